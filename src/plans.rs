//! Static listing-plan catalog.

use rust_decimal::Decimal;

pub const FREE_TRIAL_ID: &str = "free_trial";

/// Extra days granted when leaving the free trial.
pub const TRIAL_BONUS_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Plan {
    pub id: &'static str,
    pub name: &'static str,
    pub price_cents: i64,
    pub duration_days: i64,
    /// `None` means unlimited.
    pub item_limit: Option<u32>,
    pub description: &'static str,
}

impl Plan {
    pub fn price(&self) -> Decimal {
        Decimal::new(self.price_cents, 2)
    }
}

pub static PLANS: [Plan; 4] = [
    Plan {
        id: "pay_per_item",
        name: "Avulso",
        price_cents: 290,
        duration_days: 365,
        item_limit: Some(1),
        description: "R$ 2,90 por item",
    },
    Plan {
        id: "monthly",
        name: "Mensal",
        price_cents: 4990,
        duration_days: 30,
        item_limit: Some(20),
        description: "20 itens por mês",
    },
    Plan {
        id: "package_60",
        name: "Bimestral",
        price_cents: 14900,
        duration_days: 60,
        item_limit: Some(100),
        description: "100 itens por 60 dias",
    },
    Plan {
        id: "package_90",
        name: "Trimestral",
        price_cents: 60000,
        duration_days: 90,
        item_limit: Some(300),
        description: "300 itens por 90 dias",
    },
];

pub static FREE_TRIAL: Plan = Plan {
    id: FREE_TRIAL_ID,
    name: "Período Gratuito",
    price_cents: 0,
    duration_days: 30,
    item_limit: Some(20),
    description: "Plano inicial",
};

pub fn find_plan(id: &str) -> Option<&'static Plan> {
    PLANS.iter().find(|plan| plan.id == id)
}

/// Plan definition for a user's plan id, falling back to the free trial.
pub fn resolve_plan(id: Option<&str>) -> &'static Plan {
    id.and_then(find_plan).unwrap_or(&FREE_TRIAL)
}

/// True when the user has no paid plan yet.
pub fn is_on_trial(id: Option<&str>) -> bool {
    matches!(id, None | Some(FREE_TRIAL_ID))
}

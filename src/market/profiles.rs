use chrono::{DateTime, Duration, Utc};

use super::{Ignored, MarketState, RemoteWrite, Transition};
use crate::{
    ids,
    models::{ProfileFields, User, UserRole},
    plans, policy,
};

/// Shop name used when a shop signs in without registration data.
pub const FALLBACK_SHOP_NAME: &str = "Loja Anunciante";
pub const ADMIN_NAME: &str = "Administrador";

impl MarketState {
    /// Adopts the profile matching `identifier` or registers a new one.
    ///
    /// `remote_match` is a profile the caller already found in the table store;
    /// it is adopted into the registry without a write. Identifiers containing
    /// `admin` register as administrators.
    pub fn login(
        mut self,
        identifier: &str,
        role: UserRole,
        registration: Option<ProfileFields>,
        remote_match: Option<User>,
        now: DateTime<Utc>,
    ) -> Transition<User> {
        if let Some(existing) = self.find_by_identifier(identifier).cloned() {
            return Transition::local(self, existing);
        }
        if let Some(found) = remote_match {
            self.profiles.push(found.clone());
            return Transition::local(self, found);
        }

        let user = new_profile(identifier, role, registration, now);
        self.profiles.push(user.clone());
        Transition::new(self, user.clone(), RemoteWrite::InsertProfile(user))
    }

    /// Email and phone stay unique: a value already used by another profile
    /// is refused.
    pub fn update_user(
        mut self,
        actor: Option<&str>,
        fields: ProfileFields,
    ) -> Transition<Result<User, Ignored>> {
        let actor_id = match self.actor(actor).map(|user| user.id.clone()) {
            Ok(id) => id,
            Err(reason) => return Transition::ignored(self, reason),
        };
        let fields = fields.normalized();
        let taken = [fields.email.as_deref(), fields.phone.as_deref()]
            .into_iter()
            .flatten()
            .any(|identifier| {
                self.profiles
                    .iter()
                    .any(|other| other.id != actor_id && other.matches_identifier(identifier))
            });
        if taken {
            return Transition::ignored(self, Ignored::IdentifierTaken);
        }

        let Some(user) = self.profiles.iter_mut().find(|user| user.id == actor_id) else {
            return Transition::ignored(self, Ignored::NoSession);
        };
        fields.apply_to(user);
        let updated = user.clone();

        if fields.is_empty() {
            return Transition::local(self, Ok(updated));
        }
        Transition::new(
            self,
            Ok(updated),
            RemoteWrite::UpdateProfile {
                id: actor_id,
                fields,
            },
        )
    }

    pub fn upgrade_plan(
        mut self,
        actor: Option<&str>,
        plan_id: &str,
        now: DateTime<Utc>,
    ) -> Transition<Result<User, Ignored>> {
        let current = match self.actor(actor).cloned() {
            Ok(user) => user,
            Err(reason) => return Transition::ignored(self, reason),
        };
        let Some(plan) = plans::find_plan(plan_id) else {
            return Transition::ignored(self, Ignored::UnknownPlan);
        };

        let expires_at = policy::upgraded_expiration(current.plan.as_deref(), plan, now);
        let Some(user) = self.profiles.iter_mut().find(|user| user.id == current.id) else {
            return Transition::ignored(self, Ignored::NoSession);
        };
        user.plan = Some(plan.id.to_string());
        user.plan_expires_at = Some(expires_at);
        let updated = user.clone();

        Transition::new(
            self,
            Ok(updated),
            RemoteWrite::UpdatePlan {
                id: current.id,
                plan: plan.id.to_string(),
                expires_at,
            },
        )
    }
}

fn new_profile(
    identifier: &str,
    role: UserRole,
    registration: Option<ProfileFields>,
    now: DateTime<Utc>,
) -> User {
    let registration = registration.map(ProfileFields::normalized).unwrap_or_default();
    let display = registration
        .shop_name
        .clone()
        .unwrap_or_else(|| FALLBACK_SHOP_NAME.to_string());
    let is_shop = role == UserRole::Shop;

    let mut user = User {
        id: ids::profile_id(role),
        email: identifier.to_string(),
        name: display.clone(),
        role,
        shop_name: Some(display),
        address: None,
        phone: Some(identifier.to_string()),
        neighborhood: None,
        open_time: None,
        close_time: None,
        logo_url: None,
        location: None,
        plan: is_shop.then(|| plans::FREE_TRIAL_ID.to_string()),
        plan_expires_at: is_shop.then(|| now + Duration::days(plans::FREE_TRIAL.duration_days)),
    };
    registration.apply_to(&mut user);

    if identifier.contains("admin") {
        user.role = UserRole::Admin;
        user.name = ADMIN_NAME.to_string();
    }
    user
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_shop_gets_trial_and_fallback_name() {
        let now = Utc::now();
        let t = MarketState::new().login("(11) 5555-0000", UserRole::Shop, None, None, now);
        let user = t.outcome;
        assert_eq!(user.role, UserRole::Shop);
        assert_eq!(user.name, FALLBACK_SHOP_NAME);
        assert_eq!(user.plan.as_deref(), Some("free_trial"));
        assert_eq!(user.plan_expires_at, Some(now + Duration::days(30)));
        assert!(t.state.shop(&user.id).is_some());
        assert!(matches!(t.write, Some(RemoteWrite::InsertProfile(_))));
    }

    #[test]
    fn admin_identifier_grants_admin_role() {
        let t = MarketState::new().login("admin@market", UserRole::User, None, None, Utc::now());
        assert_eq!(t.outcome.role, UserRole::Admin);
        assert_eq!(t.outcome.name, ADMIN_NAME);
        assert!(t.outcome.plan.is_none());
    }

    #[test]
    fn update_refuses_another_profiles_identifier() {
        let now = Utc::now();
        let first = MarketState::new().login("111", UserRole::Shop, None, None, now);
        let first_id = first.outcome.id.clone();
        let second = first.state.login("222", UserRole::Shop, None, None, now);
        let second_id = second.outcome.id.clone();

        let clash = ProfileFields {
            phone: Some("111".into()),
            ..Default::default()
        };
        let t = second.state.update_user(Some(&second_id), clash);
        assert_eq!(t.outcome, Err(Ignored::IdentifierTaken));
        assert!(t.write.is_none());
        let owner = t.state.find_by_identifier("111").map(|u| u.id.clone());
        assert_eq!(owner, Some(first_id));

        let own = ProfileFields {
            phone: Some("222".into()),
            neighborhood: Some("Centro".into()),
            ..Default::default()
        };
        let t = t.state.update_user(Some(&second_id), own);
        assert!(t.outcome.is_ok());
    }

    #[test]
    fn existing_profile_is_adopted_without_write() {
        let now = Utc::now();
        let first = MarketState::new().login("555", UserRole::Shop, None, None, now);
        let id = first.outcome.id.clone();
        let second = first.state.login("555", UserRole::Shop, None, None, now);
        assert_eq!(second.outcome.id, id);
        assert!(second.write.is_none());
        assert_eq!(second.state.profiles.len(), 1);
    }

    #[test]
    fn registration_fields_override_defaults() {
        let registration = ProfileFields {
            shop_name: Some("Padaria Central".into()),
            email: Some("padaria@example.com".into()),
            neighborhood: Some("Centro".into()),
            ..ProfileFields::default()
        };
        let t =
            MarketState::new().login("999", UserRole::Shop, Some(registration), None, Utc::now());
        assert_eq!(t.outcome.name, "Padaria Central");
        assert_eq!(t.outcome.email, "padaria@example.com");
        assert_eq!(t.outcome.phone.as_deref(), Some("999"));
        assert_eq!(t.outcome.neighborhood.as_deref(), Some("Centro"));
    }
}

use rand::Rng;
use uuid::Uuid;

use crate::models::UserRole;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Random lowercase base36 string of `len` characters.
pub fn short_id(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect()
}

/// `shop_xxxxx` for shops, `user_xxxxx` for everyone else.
pub fn profile_id(role: UserRole) -> String {
    let prefix = match role {
        UserRole::Shop => "shop",
        _ => "user",
    };
    format!("{prefix}_{}", short_id(5))
}

pub fn guest_id() -> String {
    format!("guest_{}", short_id(9))
}

pub fn entity_id() -> String {
    Uuid::new_v4().to_string()
}

pub fn session_id() -> String {
    Uuid::new_v4().simple().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixed_ids_have_expected_shape() {
        let shop = profile_id(UserRole::Shop);
        assert!(shop.starts_with("shop_"));
        assert_eq!(shop.len(), 10);

        let admin = profile_id(UserRole::Admin);
        assert!(admin.starts_with("user_"));

        let guest = guest_id();
        assert!(guest.starts_with("guest_"));
        assert!(guest[6..].chars().all(|c| c.is_ascii_alphanumeric() && !c.is_ascii_uppercase()));
    }
}

use chrono::{DateTime, Utc};

use super::{Ignored, MarketState, RemoteWrite, Transition};
use crate::{
    ids,
    models::{ChatMessage, GuestInfo, Order, OrderStatus},
};

impl MarketState {
    pub fn messages_for(&self, product_id: &str) -> impl Iterator<Item = &ChatMessage> {
        self.chats
            .iter()
            .filter(move |message| message.product_id == product_id)
    }

    pub fn orders_as_buyer(&self, buyer_id: &str) -> impl Iterator<Item = &Order> {
        self.orders
            .iter()
            .filter(move |order| order.buyer_id == buyer_id)
    }

    pub fn orders_as_shop(&self, shop_id: &str) -> impl Iterator<Item = &Order> {
        self.orders
            .iter()
            .filter(move |order| order.shop_id == shop_id)
    }

    /// Appends a chat message. The sender is the signed-in user when there is
    /// one, otherwise the guest identity supplied by the client.
    pub fn send_message(
        mut self,
        actor: Option<&str>,
        product_id: &str,
        text: &str,
        guest: Option<GuestInfo>,
        now: DateTime<Utc>,
    ) -> Transition<Result<ChatMessage, Ignored>> {
        let sender = match actor.and_then(|id| self.profile(id)) {
            Some(user) => Some((user.id.clone(), user.name.clone())),
            None => guest
                .filter(|guest| !guest.id.is_empty() && !guest.name.is_empty())
                .map(|guest| (guest.id, guest.name)),
        };
        let Some((sender_id, sender_name)) = sender else {
            return Transition::ignored(self, Ignored::NoSender);
        };

        let message = ChatMessage {
            id: ids::entity_id(),
            product_id: product_id.to_string(),
            sender_id,
            sender_name,
            text: text.to_string(),
            timestamp: now,
        };
        self.chats.push(message.clone());
        Transition::new(self, Ok(message.clone()), RemoteWrite::InsertChatMessage(message))
    }

    /// Records a pending purchase of `product_id` by the acting user.
    pub fn place_order(
        mut self,
        actor: Option<&str>,
        product_id: &str,
        now: DateTime<Utc>,
    ) -> Transition<Result<Order, Ignored>> {
        let buyer_id = match self.actor(actor).map(|user| user.id.clone()) {
            Ok(id) => id,
            Err(reason) => return Transition::ignored(self, reason),
        };
        let Some(product) = self.product(product_id).cloned() else {
            return Transition::ignored(self, Ignored::UnknownProduct);
        };

        let order = Order {
            id: ids::entity_id(),
            buyer_id,
            shop_id: product.shop_id,
            product_id: product.id,
            product_title: product.title,
            product_image: product.image_url,
            price: product.price,
            status: OrderStatus::Pending,
            created_at: now,
        };
        self.orders.insert(0, order.clone());
        Transition::new(self, Ok(order.clone()), RemoteWrite::InsertOrder(order))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRole;

    #[test]
    fn message_without_session_or_guest_is_ignored() {
        let t = MarketState::new().send_message(None, "p1", "hello", None, Utc::now());
        assert_eq!(t.outcome, Err(Ignored::NoSender));
        assert!(t.state.chats.is_empty());
    }

    #[test]
    fn session_user_wins_over_guest_info() {
        let now = Utc::now();
        let t = MarketState::new().login("buyer-1", UserRole::User, None, None, now);
        let buyer = t.outcome.clone();
        let guest = GuestInfo {
            id: "guest_abc".into(),
            name: "Visitante".into(),
        };
        let t = t.state.send_message(Some(&buyer.id), "p1", "oi", Some(guest), now);
        let message = t.outcome.expect("message sent");
        assert_eq!(message.sender_id, buyer.id);
        assert_eq!(message.sender_name, buyer.name);
    }

    #[test]
    fn guest_message_uses_guest_identity() {
        let guest = GuestInfo {
            id: "guest_abc".into(),
            name: "Visitante".into(),
        };
        let t = MarketState::new().send_message(None, "p1", "oi", Some(guest), Utc::now());
        let message = t.outcome.expect("message sent");
        assert_eq!(message.sender_id, "guest_abc");
        assert_eq!(t.state.messages_for("p1").count(), 1);
        assert_eq!(t.state.messages_for("p2").count(), 0);
    }
}

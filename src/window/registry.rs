use std::collections::HashMap;

use slotmap::{new_key_type, SlotMap};
use x11rb::protocol::xproto::Window;

use crate::window::client::{Client, Workspace};

new_key_type! {
    /// Stable handle for a client record; survives any amount of
    /// reordering and removal of other clients.
    pub struct ClientId;
}

/// Owns every managed window. Records live in a slotmap arena; the
/// stacking/cycling order (most-recently-managed first) is a separate index
/// list, so removal is a splice and can never leave a dangling link.
#[derive(Default)]
pub struct ClientRegistry {
    clients: SlotMap<ClientId, Client>,
    order: Vec<ClientId>,
    by_window: HashMap<Window, ClientId>,
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts at the front of the order. Re-adding a window that is
    /// already managed returns the existing id untouched.
    pub fn add(&mut self, client: Client) -> ClientId {
        if let Some(&id) = self.by_window.get(&client.window) {
            return id;
        }
        let window = client.window;
        let id = self.clients.insert(client);
        self.by_window.insert(window, id);
        self.order.insert(0, id);
        id
    }

    pub fn remove(&mut self, id: ClientId) -> Option<Client> {
        let client = self.clients.remove(id)?;
        self.by_window.remove(&client.window);
        self.order.retain(|&o| o != id);
        Some(client)
    }

    pub fn find_window(&self, window: Window) -> Option<ClientId> {
        self.by_window.get(&window).copied()
    }

    pub fn get(&self, id: ClientId) -> Option<&Client> {
        self.clients.get(id)
    }

    pub fn get_mut(&mut self, id: ClientId) -> Option<&mut Client> {
        self.clients.get_mut(id)
    }

    pub fn contains(&self, id: ClientId) -> bool {
        self.clients.contains_key(id)
    }

    pub fn order(&self) -> &[ClientId] {
        &self.order
    }

    pub fn iter_ordered(&self) -> impl Iterator<Item = (ClientId, &Client)> {
        self.order.iter().map(move |&id| (id, &self.clients[id]))
    }

    /// Non-dock clients on the given workspace, in registry order.
    pub fn on_workspace(&self, ws: usize) -> Vec<ClientId> {
        self.iter_ordered()
            .filter(|(_, c)| !c.is_dock && c.workspace == Workspace::Index(ws))
            .map(|(id, _)| id)
            .collect()
    }

    pub fn first_on(&self, ws: usize) -> Option<ClientId> {
        self.iter_ordered()
            .find(|(_, c)| !c.is_dock && c.workspace == Workspace::Index(ws))
            .map(|(id, _)| id)
    }

    pub fn docks(&self) -> impl Iterator<Item = (ClientId, &Client)> {
        self.iter_ordered().filter(|(_, c)| c.is_dock)
    }

    /// Exchanges the order positions of two clients. Callers enforce the
    /// same-workspace, non-dock precondition.
    pub fn swap_order(&mut self, a: ClientId, b: ClientId) -> bool {
        if a == b {
            return false;
        }
        let (Some(pa), Some(pb)) = (
            self.order.iter().position(|&o| o == a),
            self.order.iter().position(|&o| o == b),
        ) else {
            return false;
        };
        self.order.swap(pa, pb);
        true
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::layout::Rect;

    fn client(window: Window, ws: usize) -> Client {
        Client::new(window, Rect::new(0, 0, 100, 100), Workspace::Index(ws))
    }

    #[test]
    fn add_is_most_recent_first_and_rejects_duplicates() {
        let mut reg = ClientRegistry::new();
        let a = reg.add(client(1, 0));
        let b = reg.add(client(2, 0));
        assert_eq!(reg.order(), &[b, a]);

        let again = reg.add(client(2, 3));
        assert_eq!(again, b);
        assert_eq!(reg.len(), 2);
        // the original record wins
        assert_eq!(reg.get(b).unwrap().workspace, Workspace::Index(0));
    }

    #[test]
    fn find_after_remove_returns_none() {
        let mut reg = ClientRegistry::new();
        let a = reg.add(client(1, 0));
        let b = reg.add(client(2, 0));
        assert!(reg.remove(a).is_some());
        assert_eq!(reg.find_window(1), None);
        assert!(!reg.contains(a));
        assert!(reg.remove(a).is_none());

        // the front of the order is still a live client
        let front = reg.order()[0];
        assert_eq!(front, b);
        assert!(reg.get(front).is_some());
    }

    #[test]
    fn on_workspace_filters_docks_and_other_workspaces() {
        let mut reg = ClientRegistry::new();
        let a = reg.add(client(1, 0));
        reg.add(client(2, 1));
        let dock = reg.add(Client::dock(
            3,
            Rect::new(0, 0, 800, 30),
            crate::window::strut::Strut::default(),
        ));
        assert_eq!(reg.on_workspace(0), vec![a]);
        assert!(!reg.on_workspace(0).contains(&dock));
        assert_eq!(reg.first_on(2), None);
    }

    #[test]
    fn swap_is_its_own_inverse() {
        let mut reg = ClientRegistry::new();
        let a = reg.add(client(1, 0));
        let b = reg.add(client(2, 0));
        let c = reg.add(client(3, 0));
        let before: Vec<_> = reg.order().to_vec();

        // adjacent
        assert!(reg.swap_order(c, b));
        assert_eq!(reg.order(), &[b, c, a]);
        assert!(reg.swap_order(c, b));
        assert_eq!(reg.order(), &before[..]);

        // non-adjacent
        assert!(reg.swap_order(a, c));
        assert!(reg.swap_order(a, c));
        assert_eq!(reg.order(), &before[..]);

        assert!(!reg.swap_order(a, a));
    }
}

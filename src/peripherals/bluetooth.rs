//! Phone connection state

/// Link to the companion phone app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Connection {
    #[default]
    Connected,
    Disconnected,
}

impl Connection {
    pub const fn is_connected(self) -> bool {
        matches!(self, Connection::Connected)
    }

    /// Whether going from `self` to `next` drops the link
    pub const fn drops_to(self, next: Connection) -> bool {
        self.is_connected() && !next.is_connected()
    }
}

impl From<bool> for Connection {
    fn from(connected: bool) -> Self {
        if connected {
            Connection::Connected
        } else {
            Connection::Disconnected
        }
    }
}

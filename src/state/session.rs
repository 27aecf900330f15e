use crate::models::types::UserName;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnState {
    /// User is not logged in
    PreLogin,
    /// User is logged in
    LoggedIn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Telnet,
    /// In-process caller (admin tooling, tests)
    Local,
}

#[derive(Debug)]
pub struct Session {
    // When is the session started/created
    pub session_started: std::time::Instant,

    /// Protocol used by the client
    protocol: Protocol,
    /// Logged in player (if any)
    user: Option<UserName>,
    /// Current connection state
    state: ConnState,
}

impl Session {
    pub fn new(protocol: Protocol) -> Self {
        Self {
            session_started: std::time::Instant::now(),
            protocol,
            user: None,
            state: ConnState::PreLogin,
        }
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    pub fn is_logged_in(&self) -> bool {
        self.state == ConnState::LoggedIn && self.user.is_some()
    }

    pub fn get_user(&self) -> Option<UserName> {
        self.user.clone()
    }

    pub fn login(&mut self, user: UserName) {
        self.user = Some(user);
        self.state = ConnState::LoggedIn;
    }

    pub fn logout(&mut self) {
        self.user = None;
        self.state = ConnState::PreLogin;
    }
}

use std::fmt;

/// A repository the account watches, keyed by owner and name.
///
/// Field order is significant: the derived `Ord` compares `organization`
/// first and `repository` second, byte-wise.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Subscription {
    pub organization: String,
    pub repository: String,
}

impl Subscription {
    pub fn new(organization: impl Into<String>, repository: impl Into<String>) -> Self {
        Self {
            organization: organization.into(),
            repository: repository.into(),
        }
    }
}

impl fmt::Display for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.organization, self.repository)
    }
}

/// One page of the watched-repositories listing.
#[derive(Debug, Clone, Default)]
pub struct WatchedPage {
    pub items: Vec<Subscription>,
    /// Page to request next. `None` (or 0) once the listing is exhausted.
    pub next_page: Option<u32>,
    /// Server's estimate of the final page number, if it reported one.
    pub last_page: Option<u32>,
}

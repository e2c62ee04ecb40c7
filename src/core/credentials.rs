use std::fmt::{Debug, Formatter};

/// Portal account and the meter to report on.
#[must_use]
#[derive(Clone, bon::Builder)]
pub struct Credentials {
    #[builder(into)]
    pub username: String,

    #[builder(into)]
    pub password: String,

    /// Meter object identifier, as the portal calls it.
    #[builder(into)]
    pub object_id: String,
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .field("object_id", &self.object_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_password() {
        let credentials =
            Credentials::builder().username("jonas").password("hunter2").object_id("42").build();
        let debug = format!("{credentials:?}");
        assert!(debug.contains("jonas"));
        assert!(!debug.contains("hunter2"));
    }
}

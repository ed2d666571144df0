pub(crate) const ADMIN_USERNAME: &str = "admin";
pub(crate) const ADMIN_FIRST_NAME: &str = "admin-first-name";
pub(crate) const ADMIN_LAST_NAME: &str = "admin-last-name";
pub(crate) const ADMIN_EMAIL: &str = "admin@invalid.example.com";

pub(crate) const SITE_MODEL: &str = "sites.site";
pub(crate) const SITE_NAME: &str = "Relay admin";
pub(crate) const SITE_DOMAIN: &str = "relayadmin.example.com";

pub(crate) const COMPONENT: &str = "WEB_ADMIN";
pub(crate) const DEBUG_ENABLED: bool = true;

pub mod profile;
pub mod site;
pub mod site_set;

// re-export for cleaner imports
pub use self::profile::{SiteProfile, format_signal};
pub use self::site::{Site, Strand};
pub use self::site_set::SiteSet;

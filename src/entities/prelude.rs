pub use super::lookups::Entity as Lookups;

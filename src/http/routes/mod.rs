pub mod accounts;
pub mod admin;
pub mod admin_campaigns;
pub mod campaigns;
pub mod catalog;
pub mod orders;

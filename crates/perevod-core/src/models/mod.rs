pub mod history;
pub mod record;

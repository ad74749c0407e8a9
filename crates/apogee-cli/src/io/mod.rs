pub mod fetch;
pub mod terminal;
pub mod ws;

mod app;
mod query;

pub use app::App;

pub mod webhook;


pub use webhook::configure_webhook_routes;

mod countries;
mod health;

pub use countries::{
    delete_country_handler, get_country_handler, image_handler, list_countries_handler,
    refresh_handler, status_handler,
};
pub use health::health_handler;

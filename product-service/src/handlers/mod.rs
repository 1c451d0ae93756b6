pub mod health;
pub mod home;
pub mod products;

pub use health::{health_check, metrics_endpoint, readiness_check};
pub use home::index;
pub use products::{
    create_product, delete_product, find_product_by_id, find_products_by_name,
    find_products_named_addproduct, list_products, update_product, DELETE_CONFIRMATION,
};

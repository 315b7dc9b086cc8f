pub mod hashmap_user_store;
pub mod password_hash;
pub mod postgres_user_store;

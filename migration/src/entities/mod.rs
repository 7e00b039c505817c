pub mod customer;
pub mod order;
pub mod order_item;
pub mod product;

pub use customer::Entity as CustomerEntity;
pub use order::Entity as OrderEntity;
pub use order_item::Entity as OrderItemEntity;
pub use product::Entity as ProductEntity;

//! Domain models for the Expirapp marketplace client

pub mod cart;
pub mod order;
pub mod product;
pub mod store;
pub mod user;

pub use cart::{Cart, CartError, CartItem, CartStore, FlattenedItem, QuantityChange, StockIssue};
pub use order::{
    filter_orders, parse_product_id, CheckoutReport, CheckoutStatus, OrderBuildError,
    OrderItemPayload, OrderPayload, OrderReceipt, OrderRecord, OrderStatus, StoreOrderResult,
};
pub use product::{filter_catalog, ApiProduct, CreateProductInput, Product, ProductsPage};
pub use store::{RegisterStoreInput, StoreProfile, UpdateStoreInput};
pub use user::{RegisterUserInput, SessionUser, UpdateUserInput, UserProfile};

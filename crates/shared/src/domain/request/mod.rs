pub mod transfer;

pub use self::transfer::{CreateTransferRequest, FindAllTransferRequest, UpdateTransferRequest};

pub mod transfer;

pub use self::transfer::{
    DynTransferRepository, DynTransferService, TransferRepositoryTrait, TransferServiceTrait,
};

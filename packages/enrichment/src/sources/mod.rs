//! Region source implementations.

mod memory;
mod mongo;

pub use memory::MemoryRegionSource;
pub use mongo::MongoRegionSource;

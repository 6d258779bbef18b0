pub mod binding;
pub mod channel;
pub mod dma;
pub mod progress;
pub mod region;
pub mod session;
pub mod software;
pub mod store;
pub mod worker;

pub use binding::AcceleratorBinding;
pub use channel::{ConfigToken, TransferChannel};
pub use dma::{DmaChannel, DmaDevice, DmaFault, Direction};
pub use progress::{ChannelProgress, LogProgress, NoProgress, ProgressObserver};
pub use region::{RegionPool, TransferRegion};
pub use session::{OffloadResult, OffloadSession, clamp_to_i16};
pub use software::SoftwareChannel;
pub use store::ResultStore;
pub use worker::OffloadWorker;

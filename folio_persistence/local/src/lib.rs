pub use archive::LocalArchiveRepository;
pub use storage::LocalStorage;

mod archive;
mod storage;

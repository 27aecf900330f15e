mod profile;
mod profile_fs;
mod profile_mem;

pub use profile::ProfileRepo;
pub use profile_fs::ProfileRepository;
pub use profile_mem::MemoryProfileRepository;

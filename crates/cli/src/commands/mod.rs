pub mod generate;
pub mod init;
pub mod platforms;

pub use generate::generate_command;
pub use init::init_command;
pub use platforms::platforms_command;

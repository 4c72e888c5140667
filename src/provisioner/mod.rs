#[allow(clippy::module_inception)]
pub mod provisioner;
pub mod terraform;

pub use provisioner::Provisioner;
pub use terraform::TerraformProvisioner;

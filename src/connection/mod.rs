//! Connection provisioning for sqlgate.
//!
//! Every request gets its own freshly opened and verified connection.

mod mock;
pub mod provisioner;

pub use mock::{MockBehavior, MockProvisioner};
pub use provisioner::{ConfigProvisioner, ConnectionProvisioner};

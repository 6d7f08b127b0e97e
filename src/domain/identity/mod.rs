pub mod entities;
pub mod errors;
pub mod invitation;
pub mod ports;
pub mod services;
pub mod value_objects;

// Re-export commonly used types
pub use entities::{Tenant, User};
pub use errors::{EncryptionError, IdentityError, RepositoryError, ValidationError};
pub use invitation::{Invitation, Validity};
pub use ports::{EncryptionService, TenantRepository, UserRepository};
pub use services::AuthenticationService;
pub use value_objects::{
  AuthenticationResult, EmailAddress, EncryptedPassword, InvitationDescriptor, PlainPassword,
  TenantId, UserDescriptor,
};

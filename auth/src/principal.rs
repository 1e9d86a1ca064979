/// Capability of an authenticated party: who it is and which credential
/// proves it.
///
/// Implemented by each service's identity type so the library can verify
/// passwords and mint tokens without knowing the service's user model.
pub trait Principal {
    /// Stable identifier, embedded in issued tokens as the `userId` claim.
    fn id(&self) -> String;

    /// Login name, used as the token subject.
    fn username(&self) -> &str;

    /// Stored credential hash.
    fn credential_hash(&self) -> &str;
}

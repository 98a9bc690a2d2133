use std::{env, fmt};

/// Secret for the generation API. Never serialized and never printed.
#[derive(Clone)]
pub struct Credential(Box<str>);

impl Credential {
    pub fn new(secret: impl Into<Box<str>>) -> Option<Self> {
        let secret = secret.into();
        (!secret.trim().is_empty()).then_some(Self(secret))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

pub trait CredentialSource: Send + Sync {
    fn credential(&self) -> Option<Credential>;
}

/// Reads the variable on every call, so a key added to the environment is
/// picked up without a restart.
#[derive(Debug, Clone)]
pub struct EnvCredential {
    var: Box<str>,
}

impl EnvCredential {
    pub fn new(var: &str) -> Self {
        Self { var: var.into() }
    }
}

impl CredentialSource for EnvCredential {
    fn credential(&self) -> Option<Credential> {
        env::var(&*self.var).ok().and_then(Credential::new)
    }
}

#[derive(Debug, Clone, Default)]
pub struct StaticCredential(Option<Credential>);

impl StaticCredential {
    pub fn new(secret: Option<&str>) -> Self {
        Self(secret.and_then(Credential::new))
    }
}

impl CredentialSource for StaticCredential {
    fn credential(&self) -> Option<Credential> {
        self.0.clone()
    }
}

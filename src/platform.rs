//! Build-target platform descriptors and SDK resolution.

use crate::BuildError;

/// One build target, handed in by the orchestrator.
///
/// A descriptor is read-only input to the build step; one instance exists
/// per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    /// Platform+architecture tag, e.g. `iphoneos-arm64`.
    pub name: String,
    /// Instruction set handed to the compiler, e.g. `arm64`.
    pub arch: String,
}

impl Platform {
    /// Create a descriptor from its name and architecture.
    #[must_use]
    pub fn new(name: impl Into<String>, arch: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arch: arch.into(),
        }
    }

    /// Resolve the SDK this platform builds against.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::UnsupportedPlatform`] for names outside the
    /// resolution table. There is deliberately no simulator fallback:
    /// silently picking the wrong SDK produces archives that link but
    /// crash at runtime on-device.
    pub fn sdk(&self) -> Result<Sdk, BuildError> {
        Sdk::resolve(&self.name)
    }
}

/// An Apple platform SDK, addressable by `xcrun -sdk <identifier>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sdk {
    /// The device SDK.
    Iphoneos,
    /// The simulator SDK.
    Iphonesimulator,
}

impl Sdk {
    /// Map a platform descriptor name to its SDK.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::UnsupportedPlatform`] for any name not in
    /// the table.
    pub fn resolve(platform_name: &str) -> Result<Self, BuildError> {
        match platform_name {
            "iphoneos-arm64" => Ok(Self::Iphoneos),
            "iphonesimulator-arm64" | "iphonesimulator-x86_64" => Ok(Self::Iphonesimulator),
            _ => Err(BuildError::UnsupportedPlatform {
                name: platform_name.to_string(),
            }),
        }
    }

    /// The identifier `xcrun` knows this SDK by.
    #[must_use]
    pub const fn identifier(self) -> &'static str {
        match self {
            Self::Iphoneos => "iphoneos",
            Self::Iphonesimulator => "iphonesimulator",
        }
    }
}

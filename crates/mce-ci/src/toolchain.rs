//! Compiler matrix entries.


/// Environment variable naming the C compiler.
pub const CC_VAR: &str = "CC";

/// Environment variable naming the C++ compiler.
pub const CXX_VAR: &str = "CXX";

/// One compiler pair the full stage sequence is repeated under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainProfile {
    /// Short name used in logs (e.g. `gcc`).
    pub compiler_id: String,

    /// Value for `CC`.
    pub cc_path: String,

    /// Value for `CXX`.
    pub cxx_path: String,
}

impl ToolchainProfile {
    pub fn new(
        compiler_id: impl Into<String>,
        cc_path: impl Into<String>,
        cxx_path: impl Into<String>,
    ) -> Self {
        Self {
            compiler_id: compiler_id.into(),
            cc_path: cc_path.into(),
            cxx_path: cxx_path.into(),
        }
    }

    pub fn gcc() -> Self {
        Self::new("gcc", "/usr/bin/gcc", "/usr/bin/g++")
    }

    pub fn clang() -> Self {
        Self::new("clang", "/usr/bin/clang", "/usr/bin/clang++")
    }

    /// The `CC`/`CXX` bindings for this entry.
    pub fn env(&self) -> [(String, String); 2] {
        [
            (CC_VAR.to_string(), self.cc_path.clone()),
            (CXX_VAR.to_string(), self.cxx_path.clone()),
        ]
    }
}

/// The fixed matrix, in execution order: gcc first, then clang.
pub fn default_matrix() -> Vec<ToolchainProfile> {
    vec![ToolchainProfile::gcc(), ToolchainProfile::clang()]
}

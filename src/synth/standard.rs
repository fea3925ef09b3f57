use std::fmt;

/// Language family a `-std=` value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
pub enum Language {
    C,
    CXX,
}

impl Language {
    /// Tag used in `CMAKE_<LANG>_STANDARD`.
    pub fn cmake_tag(&self) -> &'static str {
        match self {
            Language::C => "C",
            Language::CXX => "CXX",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cmake_tag())
    }
}

/// A resolved language standard, e.g. (`CXX`, `17`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageStandard {
    pub language: Language,
    pub version: String,
}

impl LanguageStandard {
    /// Resolve a raw `-std=` value.
    ///
    /// Anything mentioning `c++`/`gnu++` is C++ with those markers removed;
    /// everything else is C with `gnu` and `c` removed.
    pub fn resolve(raw: &str) -> Self {
        if raw.contains("c++") || raw.contains("gnu++") {
            LanguageStandard {
                language: Language::CXX,
                version: raw.replace("gnu++", "").replace("c++", ""),
            }
        } else {
            LanguageStandard {
                language: Language::C,
                version: raw.replace("gnu", "").replace('c', ""),
            }
        }
    }
}

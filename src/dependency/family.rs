//! Static knowledge about dependency families.

use crate::compiler::{CompilerId, Language};

use super::request::LinkMode;

/// An environment override that redirects registry lookup to a vendor
/// distribution.
#[derive(Debug, PartialEq, Eq)]
pub struct OverrideSpec {
    /// Environment variable holding the distribution root.
    pub variable: &'static str,
    /// Registry package used when linking statically.
    pub static_package: &'static str,
    /// Registry package used when linking against shared libraries.
    pub shared_package: &'static str,
    /// Compiler vendor the distribution's link flags are written for.
    pub native_vendor: CompilerId,
    /// Link token fragment that names the native vendor's interface layer.
    pub vendor_token: &'static str,
    /// Equivalent fragments for other vendors.
    pub vendor_equivalents: &'static [(CompilerId, &'static str)],
    /// Path component preceding the distribution version.
    pub version_marker: &'static str,
}

impl OverrideSpec {
    /// Registry package name for `mode`.
    pub fn package_for(&self, mode: LinkMode) -> &'static str {
        match mode {
            LinkMode::Static => self.static_package,
            LinkMode::Shared => self.shared_package,
        }
    }

    /// Replacement for [`OverrideSpec::vendor_token`] under `vendor`.
    pub fn equivalent_token(&self, vendor: CompilerId) -> Option<&'static str> {
        self.vendor_equivalents
            .iter()
            .find(|(id, _)| *id == vendor)
            .map(|(_, token)| *token)
    }
}

/// Intel MKL, as found through `MKLROOT`.
pub const MKL_OVERRIDE: OverrideSpec = OverrideSpec {
    variable: "MKLROOT",
    static_package: "mkl-static-lp64-iomp",
    shared_package: "mkl-dynamic-lp64-iomp",
    native_vendor: CompilerId::Intel,
    vendor_token: "mkl_intel_lp64",
    vendor_equivalents: &[(CompilerId::Gcc, "mkl_gf_lp64")],
    version_marker: "compilers_and_libraries_",
};

/// Compilers with built-in coarray support: (compiler, compile args, link args).
const COARRAY_INTRINSIC: &[(CompilerId, &[&str], &[&str])] = &[
    (CompilerId::Intel, &["-coarray=shared"], &["-coarray=shared"]),
    (CompilerId::IntelCl, &["/Qcoarray:shared"], &[]),
];

/// A dependency family: how to look a named dependency up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyFamily {
    /// BLAS/LAPACK, optionally from Intel MKL.
    Lapack,
    /// Fortran 2008 coarrays.
    Coarray,
    /// Anything else, looked up under its own name.
    Generic(String),
}

impl DependencyFamily {
    /// Family for a dependency name.
    pub fn for_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "lapack" => DependencyFamily::Lapack,
            "coarray" => DependencyFamily::Coarray,
            _ => DependencyFamily::Generic(name.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            DependencyFamily::Lapack => "lapack",
            DependencyFamily::Coarray => "coarray",
            DependencyFamily::Generic(name) => name,
        }
    }

    /// Default registry packages, in lookup order.
    pub fn registry_packages(&self, language: Language) -> Vec<String> {
        match self {
            DependencyFamily::Lapack => match language {
                Language::Fortran => vec!["lapack".to_string()],
                Language::C | Language::Cpp => vec!["lapacke".to_string()],
            },
            DependencyFamily::Coarray => vec!["caf-openmpi".to_string(), "caf".to_string()],
            DependencyFamily::Generic(name) => vec![name.clone()],
        }
    }

    /// CMake package name.
    pub fn build_config_package(&self) -> String {
        match self {
            DependencyFamily::Lapack => "LAPACK".to_string(),
            DependencyFamily::Coarray => "OpenCoarrays".to_string(),
            DependencyFamily::Generic(name) => name.clone(),
        }
    }

    /// CMake imported targets to link, empty for the package default.
    pub fn build_config_modules(&self) -> Vec<String> {
        match self {
            DependencyFamily::Coarray => vec!["OpenCoarrays::caf_mpi".to_string()],
            _ => Vec::new(),
        }
    }

    /// Compile and link args when `compiler` supports the family natively.
    pub fn intrinsic_args(&self, compiler: CompilerId) -> Option<(Vec<String>, Vec<String>)> {
        let table = match self {
            DependencyFamily::Coarray => COARRAY_INTRINSIC,
            _ => return None,
        };
        table
            .iter()
            .find(|(id, _, _)| *id == compiler)
            .map(|(_, compile, link)| (to_strings(compile), to_strings(link)))
    }

    /// Environment override, if the family has one.
    pub fn override_spec(&self) -> Option<&'static OverrideSpec> {
        match self {
            DependencyFamily::Lapack => Some(&MKL_OVERRIDE),
            _ => None,
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn family_lookup_is_case_insensitive() {
        assert_eq!(DependencyFamily::for_name("LAPACK"), DependencyFamily::Lapack);
        assert_eq!(DependencyFamily::for_name("coarray"), DependencyFamily::Coarray);
        assert_eq!(
            DependencyFamily::for_name("zlib"),
            DependencyFamily::Generic("zlib".to_string())
        );
    }

    #[test]
    fn lapack_registry_names_depend_on_language() {
        let family = DependencyFamily::Lapack;
        assert_eq!(family.registry_packages(Language::Fortran), vec!["lapack"]);
        assert_eq!(family.registry_packages(Language::C), vec!["lapacke"]);
        assert_eq!(family.registry_packages(Language::Cpp), vec!["lapacke"]);
        assert_eq!(family.build_config_package(), "LAPACK");
    }

    #[test]
    fn coarray_registry_order() {
        assert_eq!(
            DependencyFamily::Coarray.registry_packages(Language::Fortran),
            vec!["caf-openmpi", "caf"]
        );
        assert_eq!(DependencyFamily::Coarray.build_config_package(), "OpenCoarrays");
    }

    #[test]
    fn coarray_intrinsic_table() {
        let (compile, link) = DependencyFamily::Coarray
            .intrinsic_args(CompilerId::Intel)
            .unwrap();
        assert_eq!(compile, vec!["-coarray=shared"]);
        assert_eq!(link, vec!["-coarray=shared"]);

        let (compile, link) = DependencyFamily::Coarray
            .intrinsic_args(CompilerId::IntelCl)
            .unwrap();
        assert_eq!(compile, vec!["/Qcoarray:shared"]);
        assert!(link.is_empty());

        assert!(DependencyFamily::Coarray.intrinsic_args(CompilerId::Gcc).is_none());
        assert!(DependencyFamily::Lapack.intrinsic_args(CompilerId::Intel).is_none());
    }

    #[test]
    fn mkl_override_packages() {
        let spec = DependencyFamily::Lapack.override_spec().unwrap();
        assert_eq!(spec.variable, "MKLROOT");
        assert_eq!(spec.package_for(LinkMode::Static), "mkl-static-lp64-iomp");
        assert_eq!(spec.package_for(LinkMode::Shared), "mkl-dynamic-lp64-iomp");
        assert_eq!(spec.equivalent_token(CompilerId::Gcc), Some("mkl_gf_lp64"));
        assert_eq!(spec.equivalent_token(CompilerId::Pgi), None);
    }

    #[test]
    fn generic_family_uses_own_name() {
        let family = DependencyFamily::for_name("fftw3");
        assert_eq!(family.registry_packages(Language::C), vec!["fftw3"]);
        assert_eq!(family.build_config_package(), "fftw3");
        assert!(family.override_spec().is_none());
        assert!(family.build_config_modules().is_empty());
    }

    #[test]
    fn coarray_links_the_mpi_target() {
        assert_eq!(
            DependencyFamily::Coarray.build_config_modules(),
            vec!["OpenCoarrays::caf_mpi"]
        );
        assert!(DependencyFamily::Lapack.build_config_modules().is_empty());
    }
}

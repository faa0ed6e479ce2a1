//! Project layout: where every list file, template and artifact lives.
//!
//! Defaults reproduce the layout the firmware tree's build scripts expect:
//!
//! ```text
//! Build/SCons_UTest/UTestTargets.scons        registry
//! Build/SCons_UTest/UTest_<M>_Sources.scons   per-target sources
//! Build/SCons_UTest/UTest_<M>_Include.scons   per-target includes
//! Build/SCons_UTest/{Cc,Cxx,Ld,As}Flags.scons unit-test flags
//! Build/SCons_Release/Sources.scons           firmware sources
//! Build/SCons_Release/Include.scons           firmware includes
//! Build/SCons_Release/{Cc,Cxx,Ld,As}Flags.scons
//! Build/SCons_Common/{Sources,Include}.scons  shared by every target
//! Templates/{cpp,hpp,utest}template.tmp
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::{
    entities::common::RelativePath,
    error::DomainError,
    value_objects::{TargetKind, TemplateKind},
};

/// Layout configuration for one firmware project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectLayout {
    /// Extension of implementation and test files.
    pub source_extension: String,
    /// Extension of header files.
    pub header_extension: String,
    /// Prefix of unit-test files and per-target list files.
    pub test_prefix: String,
    /// Reserved name of the firmware image target.
    pub firmware_target: String,
    pub template_dir: RelativePath,
    pub unit_test_lists: RelativePath,
    pub release_lists: RelativePath,
    pub shared_lists: RelativePath,
    pub objects_dir: RelativePath,
    pub release_dir: RelativePath,
    pub tests_dir: RelativePath,
    pub reports_dir: RelativePath,
    /// Startup/system objects linked into the firmware image only.
    pub platform_objects: Vec<String>,
    /// Test framework include paths added to every unit-test target.
    pub test_framework_includes: Vec<String>,
    /// Include paths written first into every per-target include list.
    pub unit_test_common_includes: Vec<String>,
    /// Compiler flags injected into debug firmware builds.
    pub debug_flags: Vec<String>,
}

impl Default for ProjectLayout {
    fn default() -> Self {
        Self {
            source_extension: "cpp".into(),
            header_extension: "hpp".into(),
            test_prefix: "UTest".into(),
            firmware_target: "ASch".into(),
            template_dir: rel("Templates"),
            unit_test_lists: rel("Build/SCons_UTest"),
            release_lists: rel("Build/SCons_Release"),
            shared_lists: rel("Build/SCons_Common"),
            objects_dir: rel("Build/Objects"),
            release_dir: rel("Build/Release"),
            tests_dir: rel("Build/Tests"),
            reports_dir: rel("TestReports"),
            platform_objects: vec![
                "Hal_STM32F429ZI/startup/startup_stm32f429xx.s".into(),
                "Hal_STM32F429ZI/startup/system_stm32f4xx.c".into(),
            ],
            test_framework_includes: vec!["./Catch".into(), "./FakeIt".into()],
            unit_test_common_includes: vec!["./Config/include".into()],
            debug_flags: vec!["-g3".into(), "-O0".into(), "-DDEBUG".into()],
        }
    }
}

fn rel(path: &str) -> RelativePath {
    RelativePath::try_new(path).unwrap_or_default()
}

/// List files backing one target, by category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildFiles {
    pub sources: RelativePath,
    pub includes: RelativePath,
    pub c_flags: RelativePath,
    pub cxx_flags: RelativePath,
    pub ld_flags: RelativePath,
    pub as_flags: RelativePath,
    pub shared_sources: RelativePath,
    pub shared_includes: RelativePath,
}

impl ProjectLayout {
    /// The target registry file.
    pub fn registry(&self) -> Result<RelativePath, DomainError> {
        self.unit_test_lists
            .join(format!("{}Targets.scons", self.test_prefix))
    }

    pub fn unit_test_sources(&self, module: &str) -> Result<RelativePath, DomainError> {
        self.unit_test_lists
            .join(format!("{}_{}_Sources.scons", self.test_prefix, module))
    }

    pub fn unit_test_includes(&self, module: &str) -> Result<RelativePath, DomainError> {
        self.unit_test_lists
            .join(format!("{}_{}_Include.scons", self.test_prefix, module))
    }

    pub fn release_sources(&self) -> Result<RelativePath, DomainError> {
        self.release_lists.join("Sources.scons")
    }

    pub fn release_includes(&self) -> Result<RelativePath, DomainError> {
        self.release_lists.join("Include.scons")
    }

    pub fn template(&self, kind: TemplateKind) -> Result<RelativePath, DomainError> {
        self.template_dir.join(kind.file_name())
    }

    pub fn is_firmware(&self, target: &str) -> bool {
        target == self.firmware_target
    }

    pub fn target_kind(&self, target: &str) -> TargetKind {
        if self.is_firmware(target) {
            TargetKind::Firmware
        } else {
            TargetKind::UnitTest
        }
    }

    /// The list files a target is assembled from.
    pub fn build_files(&self, target: &str) -> Result<BuildFiles, DomainError> {
        let (sources, includes, flags_dir) = match self.target_kind(target) {
            TargetKind::Firmware => (
                self.release_sources()?,
                self.release_includes()?,
                &self.release_lists,
            ),
            TargetKind::UnitTest => (
                self.unit_test_sources(target)?,
                self.unit_test_includes(target)?,
                &self.unit_test_lists,
            ),
        };

        Ok(BuildFiles {
            sources,
            includes,
            c_flags: flags_dir.join("CcFlags.scons")?,
            cxx_flags: flags_dir.join("CxxFlags.scons")?,
            ld_flags: flags_dir.join("LdFlags.scons")?,
            as_flags: flags_dir.join("AsFlags.scons")?,
            shared_sources: self.shared_lists.join("Sources.scons")?,
            shared_includes: self.shared_lists.join("Include.scons")?,
        })
    }

    /// Object file for one source of a target: `Build/Objects/<T>/<stem>.o`.
    ///
    /// `source` is a raw list entry and may point outside the project
    /// (`/opt/sdk/startup.cpp`); only its file name is used.
    pub fn object_file(&self, target: &str, source: &str) -> Result<RelativePath, DomainError> {
        let normalised = source.trim().replace('\\', "/");
        let stem = normalised
            .rsplit('/')
            .find(|s| !s.is_empty() && *s != "." && *s != "..")
            .map(|name| name.split_once('.').map_or(name, |(stem, _)| stem))
            .filter(|stem| !stem.is_empty())
            .unwrap_or(target);
        self.objects_dir.join(format!("{target}/{stem}.o"))
    }

    /// Linked output of a target.
    pub fn output(&self, target: &str) -> Result<RelativePath, DomainError> {
        match self.target_kind(target) {
            TargetKind::Firmware => self.release_dir.join(format!("{target}.elf")),
            TargetKind::UnitTest => self.tests_dir.join(format!("{target}_UTest")),
        }
    }

    pub fn firmware_binary(&self) -> Result<RelativePath, DomainError> {
        self.release_dir
            .join(format!("{}.bin", self.firmware_target))
    }

    pub fn unit_test_log(&self, target: &str) -> Result<RelativePath, DomainError> {
        self.reports_dir
            .join(format!("UnitTestLogs/{target}_UTest.log"))
    }

    pub fn coverage_report(&self, target: &str) -> Result<RelativePath, DomainError> {
        self.reports_dir
            .join(format!("CoverageLogs/{target}_TestCoverage.xml"))
    }

    pub fn static_analysis_log(&self, target: &str) -> Result<RelativePath, DomainError> {
        self.reports_dir
            .join(format!("CppCheckLogs/{target}_CppCheck.log"))
    }

    /// Unit-test source of a registered module rooted at `root`.
    pub fn test_source(&self, root: &RelativePath, module: &str) -> Result<RelativePath, DomainError> {
        root.join(format!(
            "tests/{}_{}.{}",
            self.test_prefix, module, self.source_extension
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_location() {
        let layout = ProjectLayout::default();
        assert_eq!(
            layout.registry().unwrap().as_str(),
            "Build/SCons_UTest/UTestTargets.scons"
        );
    }

    #[test]
    fn per_target_list_names() {
        let layout = ProjectLayout::default();
        assert_eq!(
            layout.unit_test_sources("Sensor").unwrap().as_str(),
            "Build/SCons_UTest/UTest_Sensor_Sources.scons"
        );
        assert_eq!(
            layout.unit_test_includes("Sensor").unwrap().as_str(),
            "Build/SCons_UTest/UTest_Sensor_Include.scons"
        );
    }

    #[test]
    fn firmware_uses_release_lists() {
        let layout = ProjectLayout::default();
        let files = layout.build_files("ASch").unwrap();
        assert_eq!(files.sources.as_str(), "Build/SCons_Release/Sources.scons");
        assert_eq!(files.ld_flags.as_str(), "Build/SCons_Release/LdFlags.scons");
        assert_eq!(layout.target_kind("ASch"), TargetKind::Firmware);
    }

    #[test]
    fn unit_test_flags_are_shared_per_directory() {
        let layout = ProjectLayout::default();
        let files = layout.build_files("Sensor").unwrap();
        assert_eq!(files.c_flags.as_str(), "Build/SCons_UTest/CcFlags.scons");
        assert_eq!(
            files.shared_includes.as_str(),
            "Build/SCons_Common/Include.scons"
        );
    }

    #[test]
    fn artifact_paths() {
        let layout = ProjectLayout::default();
        assert_eq!(
            layout.object_file("Sensor", "./Drivers/Sensor/sources/Sensor.cpp").unwrap().as_str(),
            "Build/Objects/Sensor/Sensor.o"
        );
        assert_eq!(
            layout.object_file("ASch", "/opt/sdk/startup.cpp").unwrap().as_str(),
            "Build/Objects/ASch/startup.o"
        );
        assert_eq!(
            layout.object_file("ASch", "C:\\sdk\\crt0.s").unwrap().as_str(),
            "Build/Objects/ASch/crt0.o"
        );
        assert_eq!(layout.output("Sensor").unwrap().as_str(), "Build/Tests/Sensor_UTest");
        assert_eq!(layout.output("ASch").unwrap().as_str(), "Build/Release/ASch.elf");
        assert_eq!(layout.firmware_binary().unwrap().as_str(), "Build/Release/ASch.bin");
    }
}

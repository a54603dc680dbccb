//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Builder for creating test RimWorld install directories
pub struct RimWorldDirBuilder {
    temp_dir: TempDir,
}

impl RimWorldDirBuilder {
    /// Create a new builder with an empty install directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    /// Get the path to the install directory
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Add a `Data/<folder>/Defs` tree (base game or DLC)
    pub fn with_data_folder(self, folder: &str, files: &[DefFileBuilder]) -> Self {
        let defs = self.temp_dir.path().join("Data").join(folder).join("Defs");
        self.write_defs(&defs, files)
    }

    /// Add a mod with a top-level `Mods/<name>/Defs` tree
    pub fn with_mod(self, name: &str, files: &[DefFileBuilder]) -> Self {
        let defs = self.temp_dir.path().join("Mods").join(name).join("Defs");
        self.write_defs(&defs, files)
    }

    /// Add a versioned `Mods/<name>/<version>/Defs` tree
    pub fn with_versioned_mod(self, name: &str, version: &str, files: &[DefFileBuilder]) -> Self {
        let defs = self.temp_dir.path().join("Mods").join(name).join(version).join("Defs");
        self.write_defs(&defs, files)
    }

    /// Add an arbitrary file relative to the install root
    pub fn with_file(self, relative: &str, content: &str) -> Self {
        let path = self.temp_dir.path().join(relative);
        fs::create_dir_all(path.parent().expect("file has parent")).expect("Failed to create dir");
        fs::write(path, content).expect("Failed to write file");
        self
    }

    fn write_defs(self, defs: &Path, files: &[DefFileBuilder]) -> Self {
        fs::create_dir_all(defs).expect("Failed to create Defs dir");
        for file in files {
            file.create_in(defs);
        }
        self
    }

    /// Build and return the temp directory (consumes self)
    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for RimWorldDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for a definition XML file
pub struct DefFileBuilder {
    relative_path: String,
    defs: Vec<String>,
}

impl DefFileBuilder {
    /// Create a file at `relative_path` under the Defs directory
    pub fn new(relative_path: &str) -> Self {
        Self { relative_path: relative_path.to_string(), defs: Vec::new() }
    }

    /// Add `<Tag><defName>name</defName></Tag>`
    pub fn def(mut self, tag: &str, def_name: &str) -> Self {
        self.defs.push(format!(
            "  <{tag}>\n    <defName>{def_name}</defName>\n    <label>{def_name}</label>\n  </{tag}>",
        ));
        self
    }

    /// Add an abstract `<Tag Name="name" Abstract="True">` base
    pub fn abstract_def(mut self, tag: &str, name: &str) -> Self {
        self.defs.push(format!("  <{tag} Name=\"{name}\" Abstract=\"True\">\n  </{tag}>"));
        self
    }

    /// Add raw markup
    pub fn raw(mut self, markup: &str) -> Self {
        self.defs.push(markup.to_string());
        self
    }

    pub fn to_xml(&self) -> String {
        format!(
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<Defs>\n{}\n</Defs>\n",
            self.defs.join("\n")
        )
    }

    /// Create the file in the given Defs directory
    pub fn create_in(&self, defs_dir: &Path) -> PathBuf {
        let path = defs_dir.join(&self.relative_path);
        fs::create_dir_all(path.parent().expect("file has parent")).expect("Failed to create dir");
        fs::write(&path, self.to_xml()).expect("Failed to write def file");
        path
    }
}

/// A small but realistic install: core + DLC, a plain mod and a versioned mod
pub fn realistic_rimworld_dir() -> TempDir {
    RimWorldDirBuilder::new()
        .with_data_folder(
            "Core",
            &[
                DefFileBuilder::new("HediffDefs/Hediffs_Local.xml")
                    .def("HediffDef", "Flu")
                    .def("HediffDef", "Plague")
                    .def("HediffDef", "WoundInfection"),
                DefFileBuilder::new("ThingDefs_Items/Items_Resource.xml")
                    .abstract_def("ThingDef", "ResourceBase")
                    .def("ThingDef", "Steel")
                    .def("ThingDef", "Plasteel"),
                DefFileBuilder::new("TraitDefs/Traits.xml").def("TraitDef", "Kind"),
            ],
        )
        .with_data_folder(
            "Biotech",
            &[DefFileBuilder::new("GeneDefs/Genes.xml").def("GeneDef", "Hair_Grayless")],
        )
        .with_mod(
            "VanillaExpanded",
            &[DefFileBuilder::new("Things.xml").def("ThingDef", "Steel").def("ThingDef", "Uranium")],
        )
        .with_versioned_mod(
            "MedicalMod",
            "1.5",
            &[DefFileBuilder::new("Hediffs/Extra.xml").def("HediffDef", "Frostbite")],
        )
        .build()
}

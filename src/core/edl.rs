use crate::core::errors::{Error, Result};
use crate::core::json::TagRecord;
use crate::core::prefix_type::PrefixType;
use log::{info, warn};
use std::collections::{BTreeSet, HashMap};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/*-------------------------------------------------------------------------------------------------
  Tag Filter
-------------------------------------------------------------------------------------------------*/

/// Selects service tags by exact name. With an include set only listed tags pass; the
/// exclude set removes tags regardless of the include set.
///
/// ```
/// use servicetag_edl::TagFilter;
///
/// let filter = TagFilter::default().include(["A", "B"]).exclude(["B"]);
/// assert!(filter.allows("A"));
/// assert!(!filter.allows("B"));
/// assert!(!filter.allows("C"));
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TagFilter {
    include: Option<BTreeSet<String>>,
    exclude: Option<BTreeSet<String>>,
}

impl TagFilter {
    /// Only allow these tag names. An empty set disables the allow-list.
    pub fn include<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.include = name_set(names);
        self
    }

    /// Never allow these tag names.
    pub fn exclude<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.exclude = name_set(names);
        self
    }

    pub fn allows(&self, name: &str) -> bool {
        let included = self
            .include
            .as_ref()
            .map_or(true, |include| include.contains(name));
        let excluded = self
            .exclude
            .as_ref()
            .is_some_and(|exclude| exclude.contains(name));

        included && !excluded
    }
}

fn name_set<I, S>(names: I) -> Option<BTreeSet<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let names: BTreeSet<String> = names
        .into_iter()
        .map(|name| name.as_ref().to_string())
        .collect();
    (!names.is_empty()).then_some(names)
}

/*-------------------------------------------------------------------------------------------------
  EDL Variants
-------------------------------------------------------------------------------------------------*/

/// The three lists written for every service tag.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EdlVariant {
    All,
    IPv4,
    IPv6,
}

impl EdlVariant {
    /// Variants in emission order.
    pub const ALL: [EdlVariant; 3] = [EdlVariant::All, EdlVariant::IPv4, EdlVariant::IPv6];

    /// Label used in the URL index.
    pub fn label(&self) -> &'static str {
        match self {
            EdlVariant::All => "all",
            EdlVariant::IPv4 => "ipv4",
            EdlVariant::IPv6 => "ipv6",
        }
    }

    /// File name of this variant for a tag's base name.
    ///
    /// ```
    /// use servicetag_edl::EdlVariant;
    ///
    /// assert_eq!(EdlVariant::All.file_name("East_US"), "East_US.txt");
    /// assert_eq!(EdlVariant::IPv4.file_name("East_US"), "East_US-v4.txt");
    /// assert_eq!(EdlVariant::IPv6.file_name("East_US"), "East_US-v6.txt");
    /// ```
    pub fn file_name(&self, base_name: &str) -> String {
        let suffix = match self {
            EdlVariant::All => "",
            EdlVariant::IPv4 => "-v4",
            EdlVariant::IPv6 => "-v6",
        };
        format!("{base_name}{suffix}.txt")
    }
}

/// Base file name for a service tag: spaces become underscores, everything else is kept.
pub fn normalise_filename(tag_name: &str) -> String {
    tag_name.replace(' ', "_")
}

/*-------------------------------------------------------------------------------------------------
  EDL File Set
-------------------------------------------------------------------------------------------------*/

/// A service tag's prefixes split into the combined, IPv4 and IPv6 lists, in source order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EdlFileSet<'r> {
    pub all: Vec<&'r str>,
    pub ipv4: Vec<&'r str>,
    pub ipv6: Vec<&'r str>,
}

impl<'r> EdlFileSet<'r> {
    /// Split prefixes by IP version. Unrecognized prefixes are kept in the combined list
    /// only and logged.
    pub fn from_prefixes<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = &'r S>,
        S: AsRef<str> + ?Sized + 'r,
    {
        let mut file_set = EdlFileSet::default();
        for prefix in prefixes {
            let prefix = prefix.as_ref();
            file_set.all.push(prefix);
            match PrefixType::classify(prefix) {
                PrefixType::IPv4 => file_set.ipv4.push(prefix),
                PrefixType::IPv6 => file_set.ipv6.push(prefix),
                PrefixType::Unrecognized => {
                    warn!("Skipping unrecognised address prefix: {}", prefix)
                }
            }
        }
        file_set
    }

    pub fn prefixes(&self, variant: EdlVariant) -> &[&'r str] {
        match variant {
            EdlVariant::All => &self.all,
            EdlVariant::IPv4 => &self.ipv4,
            EdlVariant::IPv6 => &self.ipv6,
        }
    }

    pub fn counts(&self) -> PrefixCounts {
        PrefixCounts {
            total: self.all.len(),
            ipv4: self.ipv4.len(),
            ipv6: self.ipv6.len(),
        }
    }

    /// Write (truncating) the three list files into `output_dir`.
    pub fn write(&self, output_dir: &Path, base_name: &str) -> Result<()> {
        for variant in EdlVariant::ALL {
            write_prefix_file(
                &output_dir.join(variant.file_name(base_name)),
                self.prefixes(variant),
            )?;
        }
        Ok(())
    }
}

fn write_prefix_file(path: &Path, prefixes: &[&str]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for prefix in prefixes {
        writeln!(writer, "{prefix}")?;
    }
    writer.flush()?;
    Ok(())
}

/*-------------------------------------------------------------------------------------------------
  Build EDLs
-------------------------------------------------------------------------------------------------*/

/// Number of prefixes written to each list of a service tag.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PrefixCounts {
    pub total: usize,
    pub ipv4: usize,
    pub ipv6: usize,
}

/// A service tag whose lists were written.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WrittenTag {
    /// Service tag name as it appears in the document.
    pub name: String,

    /// Base file name shared by the tag's three lists.
    pub base_name: String,

    pub counts: PrefixCounts,
}

/// Write one [EdlFileSet] per selected service tag into `output_dir` and return the tags
/// written, in document order.
///
/// Records without a name or without prefixes are skipped. Selected records whose names
/// normalise to the same base file name are rejected with [Error::FilenameCollision]
/// before any file is written.
pub fn build(
    records: &[TagRecord],
    output_dir: &Path,
    filter: &TagFilter,
) -> Result<Vec<WrittenTag>> {
    let selected: Vec<(&TagRecord, String)> = records
        .iter()
        .filter(|record| record.is_writable() && filter.allows(&record.name))
        .map(|record| (record, normalise_filename(&record.name)))
        .collect();

    check_collisions(&selected, output_dir)?;

    fs::create_dir_all(output_dir)?;

    let mut written = Vec::with_capacity(selected.len());
    for (record, base_name) in selected {
        let file_set = EdlFileSet::from_prefixes(&record.address_prefixes);
        file_set.write(output_dir, &base_name)?;

        let counts = file_set.counts();
        info!(
            "Wrote {} (total={}, v4={}, v6={})",
            output_dir.join(EdlVariant::All.file_name(&base_name)).display(),
            counts.total,
            counts.ipv4,
            counts.ipv6
        );

        written.push(WrittenTag {
            name: record.name.clone(),
            base_name,
            counts,
        });
    }

    Ok(written)
}

fn check_collisions(selected: &[(&TagRecord, String)], output_dir: &Path) -> Result<()> {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for (record, base_name) in selected {
        if let Some(first) = seen.insert(base_name.as_str(), record.name.as_str()) {
            return Err(Error::FilenameCollision {
                base_name: base_name.clone(),
                first: first.to_string(),
                second: record.name.clone(),
                output_dir: output_dir.to_path_buf(),
            });
        }
    }
    Ok(())
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

use crate::core::edl::{EdlVariant, WrittenTag};
use crate::core::errors::Result;
use log::info;
use std::fs;
use std::path::{Component, Path};

/*-------------------------------------------------------------------------------------------------
  URL Index
-------------------------------------------------------------------------------------------------*/

/// One line of the URL index.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UrlIndexEntry<'t> {
    pub name: &'t str,
    pub url: String,
    pub variant: EdlVariant,
}

/// URL under which the files of `output_dir` are served: the base URL without trailing
/// slashes, followed by the output directory as a relative `/`-separated path.
///
/// ```
/// use servicetag_edl::index::url_prefix;
/// use std::path::Path;
///
/// assert_eq!(url_prefix("https://x.test/", Path::new("edl")), "https://x.test/edl");
/// assert_eq!(url_prefix("https://x.test", Path::new("/srv/edl/")), "https://x.test/srv/edl");
/// assert_eq!(url_prefix("https://x.test", Path::new(".")), "https://x.test");
/// ```
pub fn url_prefix(base_url: &str, output_dir: &Path) -> String {
    let base_url = base_url.trim_end_matches('/');
    let relative_dir = output_dir
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            Component::ParentDir => Some("..".into()),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => None,
        })
        .collect::<Vec<_>>()
        .join("/");

    if relative_dir.is_empty() {
        base_url.to_string()
    } else {
        format!("{base_url}/{relative_dir}")
    }
}

/// Build the index entries: tags sorted case-insensitively by name, each followed by its
/// variants in fixed order.
pub fn entries<'t>(
    tags: &'t [WrittenTag],
    output_dir: &Path,
    base_url: &str,
) -> Vec<UrlIndexEntry<'t>> {
    let prefix = url_prefix(base_url, output_dir);

    let mut sorted: Vec<&WrittenTag> = tags.iter().collect();
    sorted.sort_by_key(|tag| tag.name.to_lowercase());

    sorted
        .into_iter()
        .flat_map(|tag| {
            let prefix = &prefix;
            EdlVariant::ALL.into_iter().map(move |variant| UrlIndexEntry {
                name: &tag.name,
                url: format!("{}/{}", prefix, variant.file_name(&tag.base_name)),
                variant,
            })
        })
        .collect()
}

/// Write the URL index (`name,url,label` per line, no header) to `index_path`, replacing
/// any existing file. With no written tags the index is an empty file, not a lone newline.
pub fn write(
    tags: &[WrittenTag],
    output_dir: &Path,
    base_url: &str,
    index_path: &Path,
) -> Result<()> {
    let parent = index_path.parent();
    if let Some(parent) = parent.filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_path(index_path)?;

    for entry in entries(tags, output_dir, base_url) {
        writer.write_record([entry.name, entry.url.as_str(), entry.variant.label()])?;
    }

    writer.flush()?;
    info!("Wrote URL index to {}", index_path.display());

    Ok(())
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

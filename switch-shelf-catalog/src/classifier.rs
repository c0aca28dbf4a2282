//! Places resolved files into title records.
//!
//! Files must be fed in a stable order: when two files tie for a slot the
//! one classified first keeps it.

use switch_shelf_core::{ContentAttributes, ContentMap, ContentType, DiscoveredFile};

use crate::types::{CatalogFile, LocalLibrary, SkipReason, TitleRecord};

/// Classify every content entry of one resolved file.
///
/// A multi-content package can land in several title records. A record is
/// created on first sight and takes its multi-content and split flags from
/// the file that created it.
///
/// A file is only skipped while it holds no slot anywhere: a package whose
/// bundled update is outranked keeps its base slot and stays off the skip
/// list, and one of its entries winning a slot takes it off again.
pub fn classify(library: &mut LocalLibrary, file: &DiscoveredFile, contents: &ContentMap, split: bool) {
    let multi_content = contents.len() > 1;

    for attributes in contents.values() {
        let prefix = attributes.title_id.prefix().to_string();
        let record = library
            .titles
            .entry(prefix)
            .or_insert_with(|| TitleRecord::new(multi_content, split));

        let skip = match attributes.content_type {
            ContentType::Base => place_base(record, file, attributes),
            ContentType::Update => place_update(record, file, attributes),
            ContentType::Dlc => place_dlc(record, file, attributes),
        };

        if let Some(skip) = skip {
            if library.holds_slot(&skip.file.path) {
                log::debug!(
                    "{} still holds a slot, not skipping ({})",
                    skip.file.name,
                    skip.detail
                );
            } else {
                library.skip(skip.file, skip.reason, skip.detail);
            }
        }
    }

    if library.holds_slot(&file.path) && library.unskip(&file.path) {
        log::debug!("{} holds a slot, removed from skip list", file.name);
    }
}

/// A skip decided while the title record is borrowed.
struct PendingSkip {
    file: DiscoveredFile,
    reason: SkipReason,
    detail: String,
}

fn skip_file(file: &DiscoveredFile, reason: SkipReason, detail: String) -> Option<PendingSkip> {
    Some(PendingSkip {
        file: file.clone(),
        reason,
        detail,
    })
}

fn place_base(record: &mut TitleRecord, file: &DiscoveredFile, attributes: &ContentAttributes) -> Option<PendingSkip> {
    if let Some(existing) = &record.base {
        log::warn!(
            "Duplicate base file {} (already have {})",
            file.name,
            existing.file.name
        );
        return skip_file(
            file,
            SkipReason::Duplicate,
            format!("duplicate base file of {}", existing.file.name),
        );
    }

    log::debug!("Base {} from {}", attributes.title_id, file.name);
    record.base = Some(CatalogFile::new(file.clone(), attributes.clone()));
    None
}

fn place_update(record: &mut TitleRecord, file: &DiscoveredFile, attributes: &ContentAttributes) -> Option<PendingSkip> {
    let version = attributes.version;

    if let Some(existing) = record.updates.get(&version) {
        log::warn!(
            "Duplicate update v{} {} (already have {})",
            version,
            file.name,
            existing.file.name
        );
        return skip_file(
            file,
            SkipReason::Duplicate,
            format!("duplicate update v{} of {}", version, existing.file.name),
        );
    }

    record
        .updates
        .insert(version, CatalogFile::new(file.clone(), attributes.clone()));

    match record.latest_update {
        Some(latest) if version <= latest => {
            let holder = record
                .updates
                .get(&latest)
                .map(|u| u.file.name.as_str())
                .unwrap_or_default();
            log::warn!("Update {} superseded by v{} ({})", file.name, latest, holder);
            skip_file(
                file,
                SkipReason::SupersededByNewer,
                format!("update v{} superseded by v{} ({})", version, latest, holder),
            )
        }
        previous => {
            record.latest_update = Some(version);
            log::debug!("Latest update for {} is now v{}", attributes.title_id, version);

            let displaced = previous.and_then(|old| record.updates.get(&old))?;
            log::warn!(
                "Update {} superseded by v{} ({})",
                displaced.file.name,
                version,
                file.name
            );
            skip_file(
                &displaced.file,
                SkipReason::SupersededByNewer,
                format!(
                    "update v{} superseded by v{} ({})",
                    displaced.attributes.version, version, file.name
                ),
            )
        }
    }
}

fn place_dlc(record: &mut TitleRecord, file: &DiscoveredFile, attributes: &ContentAttributes) -> Option<PendingSkip> {
    if let Some(existing) = record.dlc.get(&attributes.title_id) {
        let held = existing.attributes.version;
        if attributes.version < held {
            log::warn!("DLC {} superseded by v{} ({})", file.name, held, existing.file.name);
            return skip_file(
                file,
                SkipReason::SupersededByNewer,
                format!(
                    "DLC v{} superseded by v{} ({})",
                    attributes.version, held, existing.file.name
                ),
            );
        }
        if attributes.version == held {
            log::warn!(
                "Duplicate DLC v{} {} (already have {})",
                held,
                file.name,
                existing.file.name
            );
            return skip_file(
                file,
                SkipReason::Duplicate,
                format!("duplicate DLC v{} of {}", held, existing.file.name),
            );
        }
        // A higher version replaces the entry; the displaced file is not
        // added to the skip list.
        log::debug!(
            "DLC {} v{} replaces v{} ({})",
            attributes.title_id,
            attributes.version,
            held,
            existing.file.name
        );
    }

    record.dlc.insert(
        attributes.title_id.clone(),
        CatalogFile::new(file.clone(), attributes.clone()),
    );
    None
}

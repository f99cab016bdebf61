// ABOUTME: Core sync loop: query pages, fetch blocks, convert, and write notes
// ABOUTME: Handles per-page failure policy, update detection, and progress reporting

use crate::{
    config::{PageFilter, SyncOptions},
    convert::convert_document,
    layout::resolve,
    model::{Block, Page},
    storage::{read_frontmatter, DocumentWriter},
    Error, Result,
};
use chrono::DateTime;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Remote side of a sync. Both calls return fully materialized sequences.
pub trait PageSource {
    fn query_pages(&self, filter: &PageFilter) -> Result<Vec<Page>>;
    fn fetch_blocks(&self, page_id: &str) -> Result<Vec<Block>>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub total: usize,
    pub written: usize,
    pub skipped: usize,
    pub failed: usize,
}

enum PageOutcome {
    Written(PathBuf),
    Skipped,
}

pub fn sync_all<S: PageSource + ?Sized>(
    source: &S,
    writer: &DocumentWriter,
    filter: &PageFilter,
    options: SyncOptions,
) -> Result<SyncReport> {
    info!(
        property = %filter.property,
        value = %filter.value,
        "Fetching eligible pages"
    );
    let pages = source.query_pages(filter)?;

    let pb = ProgressBar::new(pages.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{bar:40}] {pos}/{len} pages {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-"),
    );

    let mut report = SyncReport {
        total: pages.len(),
        ..SyncReport::default()
    };

    for page in &pages {
        debug!(page_id = %page.id, "Processing page");

        match sync_page(source, writer, page, options) {
            Ok(PageOutcome::Written(path)) => {
                info!(page_id = %page.id, path = %path.display(), "Saved");
                report.written += 1;
            }
            Ok(PageOutcome::Skipped) => {
                debug!(page_id = %page.id, "Up to date, skipped");
                report.skipped += 1;
            }
            Err(e) if options.fail_fast => {
                pb.abandon();
                return Err(e);
            }
            Err(e) => {
                warn!(page_id = %page.id, error = %e, "Page failed, continuing");
                report.failed += 1;
            }
        }

        pb.inc(1);
    }

    pb.finish_with_message(format!(
        "synced {} pages ({} written, {} skipped, {} failed)",
        report.total, report.written, report.skipped, report.failed
    ));
    info!(
        written = report.written,
        skipped = report.skipped,
        failed = report.failed,
        "Sync completed"
    );

    if report.failed > 0 {
        return Err(Error::Incomplete {
            failed: report.failed,
            total: report.total,
        });
    }

    Ok(report)
}

fn sync_page<S: PageSource + ?Sized>(
    source: &S,
    writer: &DocumentWriter,
    page: &Page,
    options: SyncOptions,
) -> Result<PageOutcome> {
    // Resolve first so a page with missing properties never hits the disk
    let resolved = resolve(page)?;

    if options.skip_unchanged
        && is_up_to_date(&writer.target(&resolved.path), &page.last_edited_time)
    {
        return Ok(PageOutcome::Skipped);
    }

    let blocks = source.fetch_blocks(&page.id)?;
    let body = convert_document(&blocks);
    let path = writer.write(&resolved.path, &resolved.header, &body)?;

    Ok(PageOutcome::Written(path))
}

fn is_up_to_date(md_path: &Path, remote_edited: &str) -> bool {
    let fm = match read_frontmatter(md_path) {
        Ok(Some(fm)) => fm,
        Ok(None) => return false,
        Err(e) => {
            debug!(path = %md_path.display(), error = %e, "Unreadable frontmatter");
            return false;
        }
    };

    match (
        DateTime::parse_from_rfc3339(&fm.last_updated),
        DateTime::parse_from_rfc3339(remote_edited),
    ) {
        (Ok(local), Ok(remote)) => local >= remote,
        _ => false,
    }
}

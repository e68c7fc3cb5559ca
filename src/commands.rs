use std::path::Path;

use anyhow::Context as _;

use crate::book::{BookInfo, BookRecord};
use crate::catalog::{Catalog, UpsertOutcome};
use crate::cli::{CloseArgs, DeleteArgs, ListArgs, ResumeArgs, ShowArgs, ViewArgs};
use crate::columns::{self, Column};
use crate::config::Config;
use crate::last_file::LastFile;
use crate::reader;
use crate::record_store::LocalFsRecordStore;
use crate::sort::SortMode;

fn open_catalog(config: &Config) -> anyhow::Result<Catalog<LocalFsRecordStore>> {
    let store = config.record_store();
    let mut catalog = Catalog::load(store)
        .with_context(|| format!("load catalog: {}", config.database_dir().display()))?;
    catalog.set_sort_mode(config.sort.field, config.sort.ascending);
    Ok(catalog)
}

fn require_catalog(config: &Config) -> anyhow::Result<Catalog<LocalFsRecordStore>> {
    if !config.use_db {
        anyhow::bail!("the book catalog is disabled (useDb is off)");
    }
    open_catalog(config)
}

fn optional_catalog(config: &Config) -> anyhow::Result<Option<Catalog<LocalFsRecordStore>>> {
    if !config.use_db {
        return Ok(None);
    }
    open_catalog(config).map(Some)
}

fn view_sort_mode(config: &Config, view: &ViewArgs) -> SortMode {
    if let Some(column) = view.sort_column {
        return columns::sort_mode_for_column(column, Some(!view.desc));
    }
    match view.sort {
        Some(field) => SortMode::new(field, !view.desc),
        None if view.desc => SortMode::new(config.sort.field, false),
        None => config.sort,
    }
}

fn apply_view(catalog: &mut Catalog<LocalFsRecordStore>, config: &Config, view: &ViewArgs) {
    let mode = view_sort_mode(config, view);
    catalog.set_sort_mode(mode.field, mode.ascending);
    catalog.set_filter(&view.filter);
}

fn book_path(path: &Path) -> anyhow::Result<String> {
    let path = reader::absolute_book_path(path)?;
    Ok(path.to_string_lossy().into_owned())
}

pub fn list(config: &Config, args: ListArgs) -> anyhow::Result<()> {
    let mut catalog = require_catalog(config)?;
    apply_view(&mut catalog, config, &args.view);

    println!("{}", columns::picker_title(catalog.filter()));
    println!("#\t{}", columns::header_text());
    for (row, book) in catalog.active().enumerate() {
        println!("{row}\t{}", columns::row_text(book));
    }
    Ok(())
}

pub fn show(config: &Config, args: ShowArgs) -> anyhow::Result<()> {
    let catalog = require_catalog(config)?;
    let path = book_path(&args.path)?;
    let book = catalog
        .lookup(&path)
        .ok_or_else(|| anyhow::anyhow!("book is not in the catalog: {path}"))?;
    print_book(book);
    Ok(())
}

fn print_book(book: &BookRecord) {
    for column in Column::ALL {
        println!("{}: {}", column.header(), column.text(book));
    }
    println!("Language: {}", book.language);
    println!("Position: {}/{}", book.line_last, book.line_total);
}

pub fn close(config: &Config, args: CloseArgs) -> anyhow::Result<()> {
    let mut catalog = optional_catalog(config)?;
    let path = book_path(&args.path)?;
    let info = BookInfo {
        first_name: args.first_name,
        last_name: args.last_name,
        title: args.title,
        sequence: args.sequence,
        language: args.language,
        genre: args.genre,
    };

    let report = reader::close_book(
        &config.data_dir,
        catalog.as_mut(),
        &path,
        args.position,
        args.total,
        &info,
    )?;

    let status = match report.catalog {
        Some(UpsertOutcome::Created) => "added to catalog",
        Some(UpsertOutcome::Updated) => "progress saved",
        Some(UpsertOutcome::Unchanged) => "no progress",
        None => "catalog not updated",
    };
    println!("{status}: {path}");
    if let Some(book) = catalog.as_ref().and_then(|catalog| catalog.lookup(&path)) {
        println!(
            "[{}%] [{}/{}] {}",
            book.percent_complete(),
            book.line_last.saturating_add(1),
            book.line_total,
            info.short_title()
        );
    }
    Ok(())
}

pub fn resume(config: &Config, args: ResumeArgs) -> anyhow::Result<()> {
    let catalog = optional_catalog(config)?;
    let path = book_path(&args.path)?;
    let last = LastFile::read(&config.data_dir);
    let position = reader::resume_position(catalog.as_ref(), &last, &path, args.total);
    println!("{position}");
    Ok(())
}

pub fn delete(config: &Config, args: DeleteArgs) -> anyhow::Result<()> {
    let mut catalog = require_catalog(config)?;
    apply_view(&mut catalog, config, &args.view);

    let rows = catalog.active_len();
    let Some(book) = catalog.delete_at(args.index) else {
        anyhow::bail!("no book at row {} (the list has {rows} rows)", args.index);
    };
    println!("removed: {} ({})", book.title, book.file_path);
    Ok(())
}

pub fn show_config(config: &Config) -> anyhow::Result<()> {
    println!("dataDir = {}", config.data_dir.display());
    println!("portable = {}", config.portable);
    println!("useDb = {}", config.use_db);
    println!("justify = {}", config.justify);
    println!("textColor = {}", config.text_color);
    println!("backColor = {}", config.back_color);
    println!("sortField = {}", config.sort.field);
    println!("sortAscending = {}", config.sort.ascending);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::sort::SortField;

    fn config() -> Config {
        let mut config = Config::with_defaults(PathBuf::from("/data"), false);
        config.sort = SortMode::new(SortField::Title, true);
        config
    }

    #[test]
    fn view_sort_defaults_to_config() {
        assert_eq!(
            view_sort_mode(&config(), &ViewArgs::default()),
            SortMode::new(SortField::Title, true)
        );
    }

    #[test]
    fn desc_alone_flips_configured_field() {
        let view = ViewArgs {
            desc: true,
            ..ViewArgs::default()
        };
        assert_eq!(
            view_sort_mode(&config(), &view),
            SortMode::new(SortField::Title, false)
        );
    }

    #[test]
    fn explicit_field_and_column() {
        let view = ViewArgs {
            sort: Some(SortField::Percent),
            ..ViewArgs::default()
        };
        assert_eq!(
            view_sort_mode(&config(), &view),
            SortMode::new(SortField::Percent, true)
        );

        let view = ViewArgs {
            sort_column: Some(4),
            desc: true,
            ..ViewArgs::default()
        };
        assert_eq!(
            view_sort_mode(&config(), &view),
            SortMode::new(SortField::Genre, false)
        );
    }
}

//! Field-by-field merge of provider metadata into a media entity
//!
//! Each provider's patch is applied according to that provider's
//! [`FieldPolicy`]: plain fields fill gaps (or overwrite, with priority),
//! shared fields are unioned and cross-load fields are kept per provider.

use std::collections::BTreeMap;

use crate::modules::media::{
    MediaEntity, MediaFormat, MediaStatus, MediaTitle, MetadataPatch, Season, TitleLocale,
    UNKNOWN,
};
use crate::modules::provider::{FieldClass, FieldPolicy, MediaField, ProviderDescriptor};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::LogContext;

/// Values that count as "nothing known" when deciding whether to overwrite
trait Blank {
    fn is_blank(&self) -> bool;
}

impl Blank for String {
    fn is_blank(&self) -> bool {
        let trimmed = self.trim();
        trimmed.is_empty() || trimmed == UNKNOWN
    }
}

// Providers report 0 for counts and years they do not know
impl Blank for u32 {
    fn is_blank(&self) -> bool {
        *self == 0
    }
}

impl Blank for i32 {
    fn is_blank(&self) -> bool {
        *self == 0
    }
}

impl<T: Blank> Blank for Option<T> {
    fn is_blank(&self) -> bool {
        self.as_ref().map_or(true, Blank::is_blank)
    }
}

impl Blank for MediaStatus {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl Blank for Season {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl Blank for MediaFormat {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

/// Merge a provider's patch into an entity
///
/// Failures are logged with the entity and provider id. Writes made before
/// the failure are kept.
pub fn fill_media_info<'a>(
    media: &'a mut MediaEntity,
    patch: MetadataPatch,
    provider: &ProviderDescriptor,
) -> &'a mut MediaEntity {
    if let Err(error) = try_fill_media_info(media, patch, provider) {
        LogContext::provider_failure("Fusion", &media.id, &provider.id, &error);
    }
    media
}

/// Fallible form of [`fill_media_info`]
pub fn try_fill_media_info(
    media: &mut MediaEntity,
    patch: MetadataPatch,
    provider: &ProviderDescriptor,
) -> AppResult<()> {
    let policy = &provider.field_policy;

    // Destructured so a new patch field cannot be silently ignored
    let MetadataPatch {
        title,
        synonyms,
        description,
        cover_image,
        banner_image,
        trailer,
        status,
        season,
        year,
        format,
        country_of_origin,
        color,
        genres,
        tags,
        artwork,
        characters,
        relations,
        total_episodes,
        current_episode,
        duration,
        total_chapters,
        total_volumes,
        current_chapter,
        publisher,
        author,
        rating,
        popularity,
    } = patch;

    if let Some(title) = title {
        merge_title(&mut media.title, title);
    }

    merge_list(&mut media.synonyms, synonyms, policy, MediaField::Synonyms);
    merge_plain(&mut media.description, description, policy, MediaField::Description);
    merge_plain(&mut media.cover_image, cover_image, policy, MediaField::CoverImage);
    merge_plain(&mut media.banner_image, banner_image, policy, MediaField::BannerImage);
    merge_plain(&mut media.trailer, trailer, policy, MediaField::Trailer);
    merge_plain_value(&mut media.status, status, policy, MediaField::Status);
    merge_plain_value(&mut media.season, season, policy, MediaField::Season);
    merge_plain(&mut media.year, year, policy, MediaField::Year);
    merge_plain_value(&mut media.format, format, policy, MediaField::Format);
    merge_plain(
        &mut media.country_of_origin,
        country_of_origin,
        policy,
        MediaField::CountryOfOrigin,
    );
    merge_plain(&mut media.color, color, policy, MediaField::Color);
    merge_list(&mut media.genres, genres, policy, MediaField::Genres);
    merge_list(&mut media.tags, tags, policy, MediaField::Tags);
    merge_list(&mut media.artwork, artwork, policy, MediaField::Artwork);
    merge_list(&mut media.characters, characters, policy, MediaField::Characters);
    merge_list(&mut media.relations, relations, policy, MediaField::Relations);
    merge_plain(&mut media.total_episodes, total_episodes, policy, MediaField::TotalEpisodes);
    merge_plain(
        &mut media.current_episode,
        current_episode,
        policy,
        MediaField::CurrentEpisode,
    );
    merge_plain(&mut media.duration, duration, policy, MediaField::Duration);
    merge_plain(&mut media.total_chapters, total_chapters, policy, MediaField::TotalChapters);
    merge_plain(&mut media.total_volumes, total_volumes, policy, MediaField::TotalVolumes);
    merge_plain(
        &mut media.current_chapter,
        current_chapter,
        policy,
        MediaField::CurrentChapter,
    );
    merge_plain(&mut media.publisher, publisher, policy, MediaField::Publisher);
    merge_plain(&mut media.author, author, policy, MediaField::Author);

    merge_cross_load(&mut media.rating, rating, &provider.id, MediaField::Rating)?;
    merge_cross_load(&mut media.popularity, popularity, &provider.id, MediaField::Popularity)?;

    media.average_rating = average_metric(&media.rating);
    media.average_popularity = average_metric(&media.popularity);

    Ok(())
}

/// Mean of every finite value in the map rounded to 2 decimals, 0 when empty
pub fn average_metric(values: &BTreeMap<String, f64>) -> f64 {
    let (sum, count) = values
        .values()
        .filter(|v| v.is_finite())
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        return 0.0;
    }
    (sum / count as f64 * 100.0).round() / 100.0
}

/// Per-locale first-writer-wins
fn merge_title(current: &mut MediaTitle, incoming: MediaTitle) {
    for locale in TitleLocale::ALL {
        let Some(value) = incoming.get(locale) else {
            continue;
        };
        let slot = current.slot_mut(locale);
        if slot.as_deref().map_or(true, |v| v.trim().is_empty()) {
            *slot = Some(value.to_string());
        }
    }
}

fn merge_plain<T: Blank>(
    slot: &mut Option<T>,
    incoming: Option<T>,
    policy: &FieldPolicy,
    field: MediaField,
) {
    if incoming.is_blank() {
        return;
    }
    if policy.is_priority(field) || slot.is_blank() {
        *slot = incoming;
    }
}

/// Plain merge for enum fields whose "unknown" variant marks them empty
fn merge_plain_value<T: Blank>(
    slot: &mut T,
    incoming: Option<T>,
    policy: &FieldPolicy,
    field: MediaField,
) {
    let Some(value) = incoming.filter(|v| !v.is_blank()) else {
        return;
    };
    if policy.is_priority(field) || slot.is_blank() {
        *slot = value;
    }
}

fn merge_list<T: PartialEq>(
    slot: &mut Vec<T>,
    incoming: Option<Vec<T>>,
    policy: &FieldPolicy,
    field: MediaField,
) {
    let Some(values) = incoming else {
        return;
    };

    match policy.class_of(field) {
        FieldClass::Shared => {
            let existing = std::mem::take(slot);
            for value in existing.into_iter().chain(values) {
                if !slot.contains(&value) {
                    slot.push(value);
                }
            }
        }
        FieldClass::Plain { priority } => {
            if !values.is_empty() && (priority || slot.is_empty()) {
                *slot = values;
            }
        }
        FieldClass::CrossLoad => {}
    }
}

fn merge_cross_load(
    slot: &mut BTreeMap<String, f64>,
    incoming: Option<f64>,
    provider_id: &str,
    field: MediaField,
) -> AppResult<()> {
    let Some(value) = incoming else {
        return Ok(());
    };
    if !value.is_finite() {
        return Err(AppError::FusionError(format!(
            "{:?} from {} is not a finite number: {}",
            field, provider_id, value
        )));
    }
    slot.insert(provider_id.to_string(), value);
    Ok(())
}

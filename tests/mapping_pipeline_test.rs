//! Mapping pipeline tests
//!
//! Runs `MappingService::map` end to end against in-memory providers.

mod utils;

use miru_mapping_lib::modules::mapping::MappingService;
use miru_mapping_lib::modules::media::{MediaFormat, MediaType, MetadataPatch, TitleLocale};
use miru_mapping_lib::modules::provider::{
    FieldPolicy, MediaField, ProviderRegistry, ProviderType,
};
use miru_mapping_lib::shared::config::{MappingConfig, MappingConfigBuilder};
use std::sync::Arc;
use std::time::Duration;
use utils::factories::ReferenceFactory;
use utils::fakes::{FakeInfoProvider, FakeSearchProvider, InfoBehavior, SearchBehavior};

const TWENTY: &str = "abcdefghijklmnopqrst";

fn service(registry: ProviderRegistry) -> MappingService {
    MappingService::new(registry, MappingConfig::default()).unwrap()
}

#[tokio::test]
async fn test_map_builds_one_entity_from_matching_providers() {
    let zoro = Arc::new(
        FakeSearchProvider::new("zoro", ProviderType::Anime)
            .with_formats(&[MediaFormat::Tv])
            .respond(
                "Frieren: Beyond Journey's End",
                &[("frieren-18542", "Frieren: Beyond Journey's End"), ("x", "Frieren Specials")],
            ),
    );
    let gogo = Arc::new(
        FakeSearchProvider::new("gogoanime", ProviderType::Anime)
            .with_formats(&[MediaFormat::Tv])
            .respond(
                "Frieren: Beyond Journey's End",
                &[("sousou-no-frieren", "Sousou no Frieren")],
            ),
    );

    let mut registry = ProviderRegistry::new();
    registry.register_search(zoro.clone()).register_search(gogo.clone());

    let reference = ReferenceFactory::frieren().build();
    let media = service(registry)
        .map(MediaType::Anime, &[MediaFormat::Tv], &reference)
        .await;

    assert_eq!(media.len(), 1);
    let entity = &media[0];
    assert_eq!(entity.id, "154587");
    assert_eq!(entity.slug, "frieren-beyond-journeys-end");
    assert_eq!(entity.media_type, MediaType::Anime);

    let zoro_mapping = entity.mapping_for("zoro").unwrap();
    assert_eq!(zoro_mapping.id, "frieren-18542");
    assert_eq!(zoro_mapping.provider_type, ProviderType::Anime);
    assert_eq!(zoro_mapping.similarity, 1.0);
    assert_eq!(entity.mapping_for("gogoanime").unwrap().id, "sousou-no-frieren");
}

#[tokio::test]
async fn test_low_confidence_matches_are_discarded() {
    // 0.65 passes the resolver's partial tier but not the pipeline floor
    let partial = Arc::new(
        FakeSearchProvider::new("partial", ProviderType::Anime)
            .respond(TWENTY, &[("p-1", "abcdefghijklmxxxxxxx"), ("p-2", "abcdxyzuvwxyzuvwxyzu")]),
    );
    let confident = Arc::new(
        FakeSearchProvider::new("confident", ProviderType::Anime)
            .respond(TWENTY, &[("c-1", "abcdefghijklmnopqrsx")]),
    );

    let mut registry = ProviderRegistry::new();
    registry
        .register_search(partial.clone())
        .register_search(confident.clone());

    let reference = ReferenceFactory::new().with_english(TWENTY).build();
    let service = service(registry);

    let mappings = service.find_mappings(MediaType::Anime, &[], &reference).await;
    assert_eq!(mappings.len(), 1);
    assert_eq!(mappings[0].data.provider_id, "confident");
    assert!(mappings.iter().all(|m| m.similarity >= 0.7));

    let media = service.map(MediaType::Anime, &[], &reference).await;
    assert_eq!(media[0].mappings.len(), 1);
    assert!(media[0].mapping_for("partial").is_none());
}

#[tokio::test]
async fn test_floor_follows_config() {
    let provider = Arc::new(
        FakeSearchProvider::new("partial", ProviderType::Anime)
            .respond(TWENTY, &[("p-1", "abcdefghijklmxxxxxxx")]),
    );
    let mut registry = ProviderRegistry::new();
    registry.register_search(provider);

    let config = MappingConfigBuilder::new()
        .similarity_floor(0.6)
        .build()
        .unwrap();
    let service = MappingService::new(registry, config).unwrap();
    let reference = ReferenceFactory::new().with_english(TWENTY).build();

    let mappings = service.find_mappings(MediaType::Anime, &[], &reference).await;
    assert_eq!(mappings.len(), 1);
    assert!((mappings[0].similarity - 0.65).abs() < 1e-9);
}

#[tokio::test]
async fn test_synonyms_are_tried_in_order_until_results() {
    let provider = Arc::new(
        FakeSearchProvider::new("mangadex", ProviderType::Manga)
            .with_descriptor(|d| d.with_preferred_title(TitleLocale::Romaji))
            .respond_with("Sousou no Frieren", SearchBehavior::Fail)
            .respond(
                "Frieren: Beyond Journey's End",
                &[("md-1", "Frieren: Beyond Journey's End")],
            )
            .respond("葬送のフリーレン", &[("md-2", "葬送のフリーレン")]),
    );
    let mut registry = ProviderRegistry::new();
    registry.register_search(provider.clone());

    let reference = ReferenceFactory::frieren().build();
    let media = service(registry).map(MediaType::Manga, &[], &reference).await;

    assert_eq!(
        provider.queries(),
        vec!["Sousou no Frieren", "Frieren: Beyond Journey's End"]
    );
    assert_eq!(media[0].mapping_for("mangadex").unwrap().id, "md-1");
}

#[tokio::test]
async fn test_exhausted_synonyms_contribute_nothing() {
    let empty = Arc::new(FakeSearchProvider::new("empty", ProviderType::Anime));
    let mut registry = ProviderRegistry::new();
    registry.register_search(empty.clone());

    let reference = ReferenceFactory::frieren().build();
    let media = service(registry).map(MediaType::Anime, &[], &reference).await;

    assert!(media.is_empty());
    assert_eq!(empty.queries().len(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_search_timeout_moves_to_next_synonym_and_cancels() {
    let slow = Arc::new(
        FakeSearchProvider::new("slow", ProviderType::Anime)
            .respond_with("Frieren: Beyond Journey's End", SearchBehavior::Hang)
            .respond("Sousou no Frieren", &[("s-1", "Sousou no Frieren")]),
    );
    let mut registry = ProviderRegistry::new();
    registry.register_search(slow.clone());

    let reference = ReferenceFactory::frieren().build();
    let started = tokio::time::Instant::now();
    let media = service(registry).map(MediaType::Anime, &[], &reference).await;
    let elapsed = started.elapsed();

    assert_eq!(media[0].mapping_for("slow").unwrap().id, "s-1");
    assert!(elapsed >= Duration::from_secs(15));
    assert!(elapsed < Duration::from_secs(3600));

    // The watcher task runs once the runtime gets a chance to poll it
    for _ in 0..10 {
        if slow.saw_cancellation() {
            break;
        }
        tokio::task::yield_now().await;
    }
    assert!(slow.saw_cancellation());
}

#[tokio::test]
async fn test_providers_are_selected_by_type_and_format() {
    let anime = Arc::new(
        FakeSearchProvider::new("zoro", ProviderType::Anime)
            .with_formats(&[MediaFormat::Tv])
            .respond("Frieren: Beyond Journey's End", &[("z", "Frieren: Beyond Journey's End")]),
    );
    let movies = Arc::new(
        FakeSearchProvider::new("tmdb", ProviderType::Meta).with_formats(&[MediaFormat::Movie]),
    );
    let manga = Arc::new(
        FakeSearchProvider::new("mangadex", ProviderType::Manga).with_formats(&[MediaFormat::Tv]),
    );

    let mut registry = ProviderRegistry::new();
    registry
        .register_search(anime.clone())
        .register_search(movies.clone())
        .register_search(manga.clone());

    let reference = ReferenceFactory::frieren().build();
    service(registry)
        .map(MediaType::Anime, &[MediaFormat::Tv, MediaFormat::Ona], &reference)
        .await;

    assert_eq!(anime.queries().len(), 1);
    assert!(movies.queries().is_empty());
    assert!(manga.queries().is_empty());
}

#[tokio::test]
async fn test_failing_provider_does_not_affect_others() {
    let broken = Arc::new(
        FakeSearchProvider::new("broken", ProviderType::Anime)
            .respond_with("Frieren: Beyond Journey's End", SearchBehavior::Fail)
            .respond_with("Sousou no Frieren", SearchBehavior::Fail),
    );
    let healthy = Arc::new(
        FakeSearchProvider::new("healthy", ProviderType::Anime)
            .respond("Frieren: Beyond Journey's End", &[("h", "Frieren: Beyond Journey's End")]),
    );
    let mut registry = ProviderRegistry::new();
    registry
        .register_search(broken.clone())
        .register_search(healthy);

    let reference = ReferenceFactory::frieren().build();
    let media = service(registry).map(MediaType::Anime, &[], &reference).await;

    assert_eq!(media.len(), 1);
    assert_eq!(media[0].mappings.len(), 1);
    assert_eq!(broken.queries().len(), 4);
}

#[tokio::test]
async fn test_map_fuses_metadata_from_info_providers() {
    let search = Arc::new(
        FakeSearchProvider::new("anilist", ProviderType::Base)
            .respond(
                "Frieren: Beyond Journey's End",
                &[("154587", "Frieren: Beyond Journey's End")],
            ),
    );
    let anilist = Arc::new(
        FakeInfoProvider::new(
            "anilist",
            InfoBehavior::Patch(MetadataPatch {
                description: Some("An elf mage outlives her party.".into()),
                genres: Some(vec!["Adventure".into(), "Drama".into()]),
                rating: Some(9.0),
                ..MetadataPatch::default()
            }),
        )
        .with_type(ProviderType::Base)
        .with_policy(FieldPolicy::new().with_shared([MediaField::Genres])),
    );
    let kitsu = Arc::new(
        FakeInfoProvider::new(
            "kitsu",
            InfoBehavior::Patch(MetadataPatch {
                description: Some("Ignored, already filled".into()),
                genres: Some(vec!["Fantasy".into()]),
                rating: Some(8.0),
                total_episodes: Some(28),
                ..MetadataPatch::default()
            }),
        )
        .with_policy(FieldPolicy::new().with_shared([MediaField::Genres])),
    );
    let broken = Arc::new(FakeInfoProvider::new("broken", InfoBehavior::Fail));

    let mut registry = ProviderRegistry::new();
    registry
        .register_search(search)
        .register_info(anilist)
        .register_info(broken.clone())
        .register_info(kitsu);

    let reference = ReferenceFactory::frieren().build();
    let media = service(registry).map(MediaType::Anime, &[], &reference).await;
    let entity = &media[0];

    assert_eq!(entity.description.as_deref(), Some("An elf mage outlives her party."));
    assert_eq!(entity.genres, vec!["Adventure", "Drama", "Fantasy"]);
    assert_eq!(entity.total_episodes, Some(28));
    assert_eq!(entity.rating.len(), 2);
    assert_eq!(entity.average_rating, 8.5);
    assert_eq!(broken.calls(), 1);
}

#[tokio::test]
async fn test_no_providers_yields_nothing() {
    let reference = ReferenceFactory::frieren().build();
    let media = service(ProviderRegistry::new())
        .map(MediaType::Anime, &[MediaFormat::Tv], &reference)
        .await;

    assert!(media.is_empty());
}

#[test]
fn test_invalid_rate_limit_is_rejected_at_construction() {
    let provider = FakeSearchProvider::new("bad", ProviderType::Anime)
        .with_descriptor(|d| d.with_rate_limit(-1.0, 1));
    let mut registry = ProviderRegistry::new();
    registry.register_search(Arc::new(provider));

    assert!(MappingService::new(registry, MappingConfig::default()).is_err());
}

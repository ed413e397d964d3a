//! Flow tests for academic year resolution and switching.
//!
//! Exercises the resolution policy end to end against the in-memory
//! repository: cookie-less default fallback, session-selection
//! precedence, and tenant default retargeting.

use std::sync::Arc;

use classtrack::adapters::memory::InMemoryAcademicYearRepository;
use classtrack::application::handlers::academic_year::{
    CreateYearCommand, CreateYearHandler, ListYearsHandler, ListYearsQuery,
    ResolveActiveYearHandler, ResolveActiveYearQuery, SwitchYearCommand, SwitchYearHandler,
    YearSource,
};
use classtrack::domain::academic_year::{AcademicYear, AcademicYearError, SessionYearSelection};
use classtrack::domain::foundation::{AcademicYearId, SchoolId};
use classtrack::ports::AcademicYearRepository;

// =============================================================================
// Test Infrastructure
// =============================================================================

struct Fixture {
    repo: Arc<InMemoryAcademicYearRepository>,
    resolve: ResolveActiveYearHandler,
    switch: SwitchYearHandler,
    create: CreateYearHandler,
    list: ListYearsHandler,
}

fn fixture() -> Fixture {
    let repo = Arc::new(InMemoryAcademicYearRepository::new());
    let dyn_repo: Arc<dyn AcademicYearRepository> = repo.clone();
    Fixture {
        repo,
        resolve: ResolveActiveYearHandler::new(dyn_repo.clone()),
        switch: SwitchYearHandler::new(dyn_repo.clone()),
        create: CreateYearHandler::new(dyn_repo.clone()),
        list: ListYearsHandler::new(dyn_repo),
    }
}

async fn create_year(f: &Fixture, school_id: SchoolId, name: &str) -> AcademicYear {
    f.create
        .handle(CreateYearCommand {
            school_id,
            name: name.to_string(),
            starts_on: None,
            ends_on: None,
            make_default: false,
        })
        .await
        .unwrap()
        .year
}

async fn resolve(
    f: &Fixture,
    school_id: SchoolId,
    selection: Option<SessionYearSelection>,
) -> Result<(AcademicYearId, YearSource), AcademicYearError> {
    f.resolve
        .handle(ResolveActiveYearQuery {
            school_id,
            session_selection: selection,
        })
        .await
        .map(|r| (r.year_id, r.source))
}

fn selection(year_id: AcademicYearId) -> Option<SessionYearSelection> {
    Some(SessionYearSelection::new(year_id))
}

// =============================================================================
// Resolution
// =============================================================================

#[tokio::test]
async fn cookie_less_resolution_returns_the_tenant_default() {
    let f = fixture();
    let school = SchoolId::new(1);
    let first = create_year(&f, school, "2023-24").await;
    create_year(&f, school, "2024-25").await;

    let (year_id, source) = resolve(&f, school, None).await.unwrap();
    assert_eq!(year_id, first.id());
    assert_eq!(source, YearSource::TenantDefault);
}

#[tokio::test]
async fn resolution_fails_for_an_unconfigured_school() {
    let f = fixture();
    let school = SchoolId::new(1);

    let result = resolve(&f, school, None).await;
    assert!(matches!(result, Err(AcademicYearError::NotConfigured(_))));
}

#[tokio::test]
async fn session_selection_wins_over_the_default() {
    let f = fixture();
    let school = SchoolId::new(1);
    create_year(&f, school, "2023-24").await;
    let second = create_year(&f, school, "2024-25").await;

    let (year_id, source) = resolve(&f, school, selection(second.id())).await.unwrap();
    assert_eq!(year_id, second.id());
    assert_eq!(source, YearSource::SessionSelection);
}

#[tokio::test]
async fn stale_session_selection_is_trusted() {
    // A selection pointing at a year the school never had still resolves;
    // the cookie is not checked against the tenant's year set.
    let f = fixture();
    let school = SchoolId::new(1);
    create_year(&f, school, "2023-24").await;

    let stale = AcademicYearId::new(999);
    let (year_id, source) = resolve(&f, school, selection(stale)).await.unwrap();
    assert_eq!(year_id, stale);
    assert_eq!(source, YearSource::SessionSelection);
}

// =============================================================================
// Switching
// =============================================================================

#[tokio::test]
async fn session_only_switch_leaves_the_default_alone() {
    let f = fixture();
    let school = SchoolId::new(1);
    let first = create_year(&f, school, "2023-24").await;
    let second = create_year(&f, school, "2024-25").await;

    let result = f
        .switch
        .handle(SwitchYearCommand {
            school_id: school,
            raw_year_id: Some(second.id().to_string()),
            set_as_default: false,
        })
        .await
        .unwrap();

    assert_eq!(result.year_id, second.id());
    assert!(!result.default_updated);
    assert_eq!(f.repo.current_of(school), Some(first.id()));
}

#[tokio::test]
async fn default_switch_retargets_every_cookie_less_session() {
    let f = fixture();
    let school = SchoolId::new(1);
    create_year(&f, school, "2023-24").await;
    let second = create_year(&f, school, "2024-25").await;

    f.switch
        .handle(SwitchYearCommand {
            school_id: school,
            raw_year_id: Some(second.id().to_string()),
            set_as_default: true,
        })
        .await
        .unwrap();

    let (year_id, source) = resolve(&f, school, None).await.unwrap();
    assert_eq!(year_id, second.id());
    assert_eq!(source, YearSource::TenantDefault);
}

#[tokio::test]
async fn default_switch_leaves_exactly_one_current_year() {
    let f = fixture();
    let school = SchoolId::new(1);
    create_year(&f, school, "2022-23").await;
    create_year(&f, school, "2023-24").await;
    let third = create_year(&f, school, "2024-25").await;

    f.switch
        .handle(SwitchYearCommand {
            school_id: school,
            raw_year_id: Some(third.id().to_string()),
            set_as_default: true,
        })
        .await
        .unwrap();

    let years = f
        .list
        .handle(ListYearsQuery { school_id: school })
        .await
        .unwrap();
    let current: Vec<_> = years.iter().filter(|y| y.is_current()).collect();
    assert_eq!(current.len(), 1);
    assert_eq!(current[0].id(), third.id());
}

#[tokio::test]
async fn default_switch_is_tenant_scoped() {
    let f = fixture();
    let school_a = SchoolId::new(1);
    let school_b = SchoolId::new(2);
    let a_default = create_year(&f, school_a, "2023-24").await;
    create_year(&f, school_b, "2023-24").await;
    let b_next = create_year(&f, school_b, "2024-25").await;

    f.switch
        .handle(SwitchYearCommand {
            school_id: school_b,
            raw_year_id: Some(b_next.id().to_string()),
            set_as_default: true,
        })
        .await
        .unwrap();

    assert_eq!(f.repo.current_of(school_a), Some(a_default.id()));
    assert_eq!(f.repo.current_of(school_b), Some(b_next.id()));
}

// =============================================================================
// The full scenario
// =============================================================================

#[tokio::test]
async fn session_switch_scenario() {
    // School S1 has years {2023-24 (default), 2024-25}.
    let f = fixture();
    let s1 = SchoolId::new(1);
    let y2023 = create_year(&f, s1, "2023-24").await;
    let y2024 = create_year(&f, s1, "2024-25").await;

    // No cookie: resolves to 2023-24.
    let (year_id, _) = resolve(&f, s1, None).await.unwrap();
    assert_eq!(year_id, y2023.id());

    // Switch the session (not the default) to 2024-25.
    let result = f
        .switch
        .handle(SwitchYearCommand {
            school_id: s1,
            raw_year_id: Some(y2024.id().to_string()),
            set_as_default: false,
        })
        .await
        .unwrap();
    assert_eq!(result.year_id, y2024.id());

    // Subsequent resolution with the cookie returns 2024-25.
    let (year_id, source) = resolve(&f, s1, selection(result.year_id)).await.unwrap();
    assert_eq!(year_id, y2024.id());
    assert_eq!(source, YearSource::SessionSelection);

    // The tenant default is still 2023-24.
    assert_eq!(f.repo.current_of(s1), Some(y2023.id()));
}

//! # 퀘스트 콘텐츠 생성기
//!
//! 카테고리, 날짜, 개수, (선택) 모드를 받아 템플릿에서 가짜 퀘스트 레코드를 만들어냅니다.
//! 화면이 비어 보이지 않도록 실제 데이터와 섞어 보여주는 표시용 콘텐츠입니다.
//!
//! ## 템플릿 풀
//! - `CANON` 요청: 카테고리의 플래그십 템플릿 ∪ 일반 템플릿
//! - 그 외: 일반 템플릿만
//! - `"All"`: 모든 카테고리를 펼쳐서 사용
//! - 풀이 비면(모르는 카테고리) 빈 목록 (에러 아님)
//!
//! ## 난수
//! 난수 소스를 인자로 받습니다 (`&mut impl Rng`).
//! 운영 코드는 `rand::thread_rng()`를 넘겨 매번 새 콘텐츠를 만들고,
//! 테스트는 시드를 고정한 `SmallRng`로 같은 결과를 재현합니다.

use chrono::{NaiveDateTime, NaiveTime};
use rand::Rng;
use std::ops::RangeInclusive;

use crate::models::{GeneratedQuest, GeoPoint, QuestMode, QuestRequest, QuestStatus};

#[derive(Debug, Clone, Copy)]
pub struct QuestTemplate {
    pub category: &'static str,
    pub activity: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

const fn template(
    category: &'static str,
    activity: &'static str,
    title: &'static str,
    description: &'static str,
) -> QuestTemplate {
    QuestTemplate {
        category,
        activity,
        title,
        description,
    }
}

pub const REGULAR_TEMPLATES: &[QuestTemplate] = &[
    template("Sports", "Basketball", "Pickup Hoops", "Half-court runs, winners stay on."),
    template("Sports", "Badminton", "Shuttle Smash", "Casual doubles, rackets to share."),
    template("Sports", "Running", "Evening 5K", "Easy pace loop, nobody gets left behind."),
    template("Sports", "Football", "Five-a-side", "Quick games, rotating teams."),
    template("Food", "Coffee Crawl", "Bean There", "Three cafes, one verdict."),
    template("Food", "Hawker Hunt", "Supper Run", "Split plates and rate every stall."),
    template("Food", "Brunch", "Lazy Brunch", "Long table, longer stories."),
    template("Music", "Open Mic", "Mic Drop Night", "Bring a song or just bring your ears."),
    template("Music", "Jam Session", "Garage Jam", "Any instrument, any skill level."),
    template("Music", "Karaoke", "Off-Key Heroes", "Duets strongly encouraged."),
    template("Art", "Sketch Walk", "Urban Sketchers", "Pick a corner, draw what you see."),
    template("Art", "Pottery", "Wheel Spin", "Get your hands muddy."),
    template("Art", "Photo Walk", "Golden Hour Shots", "Chase the light around the block."),
    template("Outdoors", "Sunset Hike", "Ridge at Dusk", "Short climb, big sky."),
    template("Outdoors", "Cycling", "Coastal Ride", "Flat route with snack stops."),
    template("Outdoors", "Picnic", "Park Picnic", "Blankets, snacks, frisbee."),
    template("Games", "Board Games", "Table Top Night", "Strategy, party games, and snacks."),
    template("Games", "Bowling", "Strike Squad", "Bumpers optional."),
    template("Games", "Arcade", "High Score Hunt", "Tokens on us, bragging rights on you."),
];

/// `CANON` 요청에서만 풀에 들어가는 큐레이션 템플릿
pub const FLAGSHIP_TEMPLATES: &[QuestTemplate] = &[
    template("Sports", "3v3 Tournament", "Court Kings Invitational", "Bracket play with a trophy on the line."),
    template("Food", "Chef's Table", "Secret Supper Club", "Seven courses at an undisclosed address."),
    template("Music", "Rooftop Gig", "Skyline Sessions", "Live sets above the city."),
    template("Art", "Mural Day", "Paint the Wall", "Leave your mark on a community mural."),
    template("Outdoors", "Sunrise Summit", "First Light Trek", "Start in the dark, finish at the top."),
    template("Games", "LAN Party", "All-Nighter Arena", "Bring your rig, we bring the power strips."),
];

/// "All" 목록의 앞 5개에 우선 배치하는 활동 (인덱스 0~4)
pub const FEATURED_ACTIVITIES: [&str; 5] =
    ["Basketball", "Coffee Crawl", "Open Mic", "Sunset Hike", "Board Games"];

/// SPONTY 좌표의 기준점과 흔들림 반경 (도 단위)
pub const REFERENCE_POINT: GeoPoint = GeoPoint {
    lat: 1.3521,
    lng: 103.8198,
};
pub const JITTER_DEGREES: f64 = 0.02;

const PLACEHOLDER_CAPTURES: &[&str] = &[
    "https://images.unsplash.com/photo-1529156069898-49953e39b3ac",
    "https://images.unsplash.com/photo-1517457373958-b7bdd4587205",
    "https://images.unsplash.com/photo-1511632765486-a01980e01a18",
    "https://images.unsplash.com/photo-1527529482837-4698179dc6ce",
];

const START_MINUTES: [u32; 4] = [0, 15, 30, 45];

fn is_all(category: &str) -> bool {
    slug::slugify(category) == "all"
}

/// 모드별 보상 범위 `(aura, exp)`: 모드끼리 겹치지 않습니다 (CANON > SPONTY > RANDOM)
pub fn reward_ranges(mode: QuestMode) -> (RangeInclusive<u32>, RangeInclusive<u32>) {
    match mode {
        QuestMode::Canon => (150..=300, 100..=200),
        QuestMode::Sponty => (50..=149, 40..=99),
        QuestMode::Random => (10..=49, 10..=39),
    }
}

/// 요청한 카테고리/모드에 해당하는 템플릿 풀을 만듭니다.
pub fn template_pool(category: &str, mode: Option<QuestMode>) -> Vec<&'static QuestTemplate> {
    let wanted = slug::slugify(category);
    let all = is_all(category);
    let matches = |t: &&QuestTemplate| all || slug::slugify(t.category) == wanted;

    let mut pool: Vec<&'static QuestTemplate> = Vec::new();
    if mode == Some(QuestMode::Canon) {
        pool.extend(FLAGSHIP_TEMPLATES.iter().filter(matches));
    }
    pool.extend(REGULAR_TEMPLATES.iter().filter(matches));
    pool
}

/// 퀘스트 레코드 `count`개를 생성합니다. 같은 입력이라도 난수 상태에 따라 결과가 달라집니다.
pub fn generate<R: Rng + ?Sized>(rng: &mut R, request: &QuestRequest) -> Vec<GeneratedQuest> {
    let pool = template_pool(&request.category, request.mode);
    if pool.is_empty() {
        return Vec::new();
    }
    let featured_head = is_all(&request.category);

    (0..request.count)
        .map(|index| {
            let featured = if featured_head {
                FEATURED_ACTIVITIES
                    .get(index)
                    .and_then(|activity| pool.iter().find(|t| t.activity == *activity))
            } else {
                None
            };
            let template = match featured {
                Some(t) => *t,
                None => pool[rng.gen_range(0..pool.len())],
            };
            build_quest(rng, template, request)
        })
        .collect()
}

fn build_quest<R: Rng + ?Sized>(
    rng: &mut R,
    template: &QuestTemplate,
    request: &QuestRequest,
) -> GeneratedQuest {
    let mode = request
        .mode
        .unwrap_or_else(|| QuestMode::ALL[rng.gen_range(0..QuestMode::ALL.len())]);

    let hour = rng.gen_range(6..=21);
    let minute = START_MINUTES[rng.gen_range(0..START_MINUTES.len())];
    let start_time = NaiveDateTime::new(
        request.date,
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default(),
    );

    let max_participants = rng.gen_range(4..=12);
    let current_participants = rng.gen_range(1..max_participants);
    let status = if current_participants >= max_participants {
        QuestStatus::Active
    } else {
        QuestStatus::Discoverable
    };

    let fee = if rng.gen_bool(0.7) {
        0
    } else {
        rng.gen_range(5..=25)
    };

    let (aura, exp) = reward_ranges(mode);
    let aura_reward = rng.gen_range(aura);
    let exp_reward = rng.gen_range(exp);

    let (location, host_capture_url) = if mode == QuestMode::Sponty {
        let point = GeoPoint {
            lat: REFERENCE_POINT.lat + rng.gen_range(-JITTER_DEGREES..=JITTER_DEGREES),
            lng: REFERENCE_POINT.lng + rng.gen_range(-JITTER_DEGREES..=JITTER_DEGREES),
        };
        let url = PLACEHOLDER_CAPTURES[rng.gen_range(0..PLACEHOLDER_CAPTURES.len())];
        (Some(point), Some(url.to_string()))
    } else {
        (None, None)
    };

    GeneratedQuest {
        id: uuid::Builder::from_random_bytes(rng.gen()).into_uuid().to_string(),
        category: template.category.to_string(),
        activity: template.activity.to_string(),
        title: template.title.to_string(),
        description: template.description.to_string(),
        mode,
        start_time,
        max_participants,
        current_participants,
        status,
        fee,
        aura_reward,
        exp_reward,
        location,
        host_capture_url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn request(category: &str, count: usize, mode: Option<QuestMode>) -> QuestRequest {
        QuestRequest {
            category: category.to_string(),
            date: NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
            count,
            mode,
        }
    }

    fn activities(templates: &[QuestTemplate], category: &str) -> HashSet<&'static str> {
        templates
            .iter()
            .filter(|t| t.category == category)
            .map(|t| t.activity)
            .collect()
    }

    #[test]
    fn sports_request_yields_exact_count_within_bounds() {
        let mut rng = SmallRng::seed_from_u64(7);
        let quests = generate(&mut rng, &request("Sports", 10, None));
        let sports = activities(REGULAR_TEMPLATES, "Sports");

        assert_eq!(quests.len(), 10);
        for q in &quests {
            assert!(sports.contains(q.activity.as_str()), "{} is not a sports activity", q.activity);
            assert_eq!(q.category, "Sports");
            assert!((4..=12).contains(&q.max_participants));
            assert!(q.current_participants >= 1);
            assert!(q.current_participants < q.max_participants);
            assert_eq!(q.status, QuestStatus::Discoverable);
        }
    }

    #[test]
    fn schedule_and_fee_stay_in_range() {
        let mut rng = SmallRng::seed_from_u64(11);
        let quests = generate(&mut rng, &request("All", 300, None));
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();

        for q in &quests {
            assert_eq!(q.start_time.date(), date);
            assert!((6..=21).contains(&q.start_time.hour()));
            assert!(START_MINUTES.contains(&q.start_time.minute()));
            assert!(q.fee == 0 || (5..=25).contains(&q.fee));
        }
        let free = quests.iter().filter(|q| q.fee == 0).count();
        assert!(free > 150 && free < 270, "free share looks off: {free}/300");
    }

    #[test]
    fn category_matching_ignores_case() {
        let mut rng = SmallRng::seed_from_u64(3);
        let quests = generate(&mut rng, &request("sports", 4, None));
        assert_eq!(quests.len(), 4);
        assert!(quests.iter().all(|q| q.category == "Sports"));
    }

    #[test]
    fn unknown_category_yields_nothing() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(generate(&mut rng, &request("Knitting", 10, None)).is_empty());
        assert!(generate(&mut rng, &request("Sports", 0, None)).is_empty());
    }

    #[test]
    fn all_listing_starts_with_featured_activities() {
        for seed in 0..20 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let quests = generate(&mut rng, &request("All", 8, None));
            let head: Vec<_> = quests.iter().take(5).map(|q| q.activity.as_str()).collect();
            assert_eq!(head, FEATURED_ACTIVITIES);
        }
    }

    #[test]
    fn featured_head_only_applies_to_all() {
        let mut rng = SmallRng::seed_from_u64(5);
        let quests = generate(&mut rng, &request("Food", 5, None));
        assert!(quests.iter().all(|q| q.category == "Food"));
    }

    #[test]
    fn canon_pool_adds_flagships() {
        let flagships = activities(FLAGSHIP_TEMPLATES, "Music");
        assert_eq!(template_pool("Music", Some(QuestMode::Canon)).len(), 4);
        assert_eq!(template_pool("Music", Some(QuestMode::Sponty)).len(), 3);

        let mut rng = SmallRng::seed_from_u64(42);
        let canon = generate(&mut rng, &request("Music", 200, Some(QuestMode::Canon)));
        assert!(canon.iter().any(|q| flagships.contains(q.activity.as_str())));
        assert!(canon.iter().all(|q| q.mode == QuestMode::Canon));

        let plain = generate(&mut rng, &request("Music", 200, None));
        assert!(plain.iter().all(|q| !flagships.contains(q.activity.as_str())));
    }

    #[test]
    fn rewards_are_disjoint_by_mode() {
        let mut rng = SmallRng::seed_from_u64(9);
        for mode in QuestMode::ALL {
            let (aura, exp) = reward_ranges(mode);
            for q in generate(&mut rng, &request("All", 50, Some(mode))) {
                assert_eq!(q.mode, mode);
                assert!(aura.contains(&q.aura_reward));
                assert!(exp.contains(&q.exp_reward));
            }
        }
        let (canon, _) = reward_ranges(QuestMode::Canon);
        let (sponty, _) = reward_ranges(QuestMode::Sponty);
        let (random, _) = reward_ranges(QuestMode::Random);
        assert!(canon.start() > sponty.end());
        assert!(sponty.start() > random.end());
    }

    #[test]
    fn only_sponty_quests_carry_geo_and_media() {
        let mut rng = SmallRng::seed_from_u64(21);
        for q in generate(&mut rng, &request("Outdoors", 30, Some(QuestMode::Sponty))) {
            let point = q.location.expect("sponty quest has a location");
            assert!((point.lat - REFERENCE_POINT.lat).abs() <= JITTER_DEGREES);
            assert!((point.lng - REFERENCE_POINT.lng).abs() <= JITTER_DEGREES);
            assert!(PLACEHOLDER_CAPTURES.contains(&q.host_capture_url.as_deref().unwrap()));
        }
        for mode in [QuestMode::Canon, QuestMode::Random] {
            for q in generate(&mut rng, &request("Outdoors", 30, Some(mode))) {
                assert!(q.location.is_none());
                assert!(q.host_capture_url.is_none());
            }
        }
    }

    #[test]
    fn seeded_runs_are_reproducible_and_ids_unique() {
        let a = generate(&mut SmallRng::seed_from_u64(99), &request("All", 25, None));
        let b = generate(&mut SmallRng::seed_from_u64(99), &request("All", 25, None));
        let ids_a: Vec<_> = a.iter().map(|q| q.id.clone()).collect();
        let ids_b: Vec<_> = b.iter().map(|q| q.id.clone()).collect();
        assert_eq!(ids_a, ids_b);
        assert_eq!(ids_a.iter().collect::<HashSet<_>>().len(), 25);

        let c = generate(&mut SmallRng::seed_from_u64(100), &request("All", 25, None));
        assert_ne!(ids_a[0], c[0].id);
    }
}

//! Combination generator.
//!
//! # Algorithm
//!
//! 1. Take the requested courses in caller order. Entries naming the same
//!    course are merged into one candidate list, and courses with no
//!    sections are skipped.
//! 2. Walk the Cartesian product of their section lists with an odometer
//!    (last course varies fastest).
//! 3. Reject a tuple if any two chosen sections overlap, then if any chosen
//!    section overlaps a blocked slot.
//! 4. Wrap each accepted tuple in a [`ScheduleCombination`] with a fresh id
//!    and computed metrics.
//!
//! Pairwise section conflicts and blocked-slot hits are precomputed once,
//! so checking a tuple of `k` sections costs `O(k²)` table lookups.
//!
//! # Complexity
//! O(Π cᵢ · k²) where cᵢ = sections of course i and k = number of courses.
//! Bound the cost with a limit, a time limit, or a cancel flag.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::{GeneratorConfig, DEFAULT_WARNING_THRESHOLD};
use crate::models::{
    blocked_blocks, normalize_code, Catalog, ClassSection, ScheduleCombination, SlotPreference,
};

/// Candidate sections of one course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSections {
    /// Course code.
    pub course_code: String,
    /// Offered sections.
    #[serde(default)]
    pub sections: Vec<ClassSection>,
}

impl CourseSections {
    /// Creates an entry for a course. The code is normalized.
    pub fn new(course_code: impl AsRef<str>, sections: Vec<ClassSection>) -> Self {
        Self {
            course_code: normalize_code(course_code.as_ref()),
            sections,
        }
    }
}

/// Input container for generation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// Courses in iteration order.
    ///
    /// Entries are keyed by normalized course code: repeated codes are merged
    /// at generation time and each course contributes at most one section.
    pub courses: Vec<CourseSections>,
    /// Blocked and preferred slots.
    #[serde(default)]
    pub preferences: Vec<SlotPreference>,
    /// Stop after this many accepted combinations. `None` or 0 = unlimited.
    #[serde(default)]
    pub limit: Option<usize>,
}

impl GenerationRequest {
    /// Creates an empty request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a course with its candidate sections.
    ///
    /// A course already in the request gets the new sections appended to its
    /// candidate list.
    pub fn with_course(mut self, course_code: impl AsRef<str>, sections: Vec<ClassSection>) -> Self {
        let entry = CourseSections::new(course_code, sections);
        match self.courses.iter_mut().find(|c| normalize_code(&c.course_code) == entry.course_code) {
            Some(existing) => existing.sections.extend(entry.sections),
            None => self.courses.push(entry),
        }
        self
    }

    /// Adds a slot preference.
    pub fn with_preference(mut self, preference: SlotPreference) -> Self {
        self.preferences.push(preference);
        self
    }

    /// Sets the acceptance limit.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Why generation ended before exhausting the search space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopReason {
    /// Accepted count reached the limit.
    Limit,
    /// Time limit elapsed.
    Deadline,
    /// Cancel flag was raised.
    Cancelled,
}

/// Output of a generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    /// Accepted combinations in enumeration order.
    pub combinations: Vec<ScheduleCombination>,
    /// Number of accepted combinations.
    pub total_generated: u64,
    /// Product of section counts (empty courses count as 1).
    pub total_possible: u64,
    /// Tuples visited.
    ///
    /// Counting stops at the tuple whose acceptance reaches the limit; the
    /// following tuple is never visited, so it is not counted either.
    pub total_checked: u64,
    /// Advisory note when the search space is large.
    pub warning: Option<String>,
    /// Set when generation stopped early.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_reason: Option<StopReason>,
}

/// Enumerates conflict-free section combinations.
///
/// # Example
///
/// ```
/// use u_timetable::models::{ClassSection, Day, TimeBlock};
/// use u_timetable::scheduler::{CombinationGenerator, GenerationRequest};
///
/// let section = |course: &str, code: &str, day| {
///     ClassSection::new(course, code)
///         .with_block(TimeBlock::parse(day, "08:00", "10:00").unwrap())
/// };
/// let request = GenerationRequest::new()
///     .with_course("MATH1", vec![section("MATH1", "A", Day::Monday), section("MATH1", "B", Day::Tuesday)])
///     .with_course("PHYS1", vec![section("PHYS1", "A", Day::Monday), section("PHYS1", "B", Day::Friday)]);
///
/// let result = CombinationGenerator::new().generate(&request);
/// assert_eq!(result.total_possible, 4);
/// assert_eq!(result.total_generated, 3); // MATH1-A + PHYS1-A clash on Monday
/// ```
#[derive(Debug, Clone)]
pub struct CombinationGenerator {
    warning_threshold: u64,
    default_limit: Option<usize>,
    time_limit: Option<Duration>,
    id_seed: Option<u64>,
    cancel_flag: Option<Arc<AtomicBool>>,
    credits: HashMap<String, u32>,
}

impl Default for CombinationGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl CombinationGenerator {
    /// Creates a generator with default settings.
    pub fn new() -> Self {
        Self {
            warning_threshold: DEFAULT_WARNING_THRESHOLD,
            default_limit: None,
            time_limit: None,
            id_seed: None,
            cancel_flag: None,
            credits: HashMap::new(),
        }
    }

    /// Creates a generator from configuration.
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self {
            warning_threshold: config.warning_threshold,
            default_limit: config.default_limit,
            time_limit: config.time_limit(),
            id_seed: config.id_seed,
            ..Self::new()
        }
    }

    /// Sets the `totalPossible` value above which a warning is attached.
    pub fn with_warning_threshold(mut self, threshold: u64) -> Self {
        self.warning_threshold = threshold;
        self
    }

    /// Sets the limit used when a request carries none.
    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_limit = Some(limit);
        self
    }

    /// Bounds wall-clock time per generation call.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Makes combination ids reproducible.
    pub fn with_id_seed(mut self, seed: u64) -> Self {
        self.id_seed = Some(seed);
        self
    }

    /// Shares a flag that aborts generation when set.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel_flag = Some(flag);
        self
    }

    /// Uses catalog credits to fill `totalCredits` on each combination.
    pub fn with_catalog(mut self, catalog: &Catalog) -> Self {
        self.credits = catalog
            .courses()
            .iter()
            .map(|c| (c.code.clone(), c.credits))
            .collect();
        self
    }

    /// Generates every valid combination for the request.
    pub fn generate(&self, request: &GenerationRequest) -> GenerationResult {
        let deadline = self.time_limit.map(|limit| Instant::now() + limit);
        let limit = request.limit.or(self.default_limit).filter(|&l| l > 0);

        let candidates = candidate_lists(&request.courses);
        let total_possible = candidates
            .iter()
            .map(|(_, sections)| sections.len().max(1) as u64)
            .fold(1u64, u64::saturating_mul);

        let warning = (total_possible > self.warning_threshold).then(|| {
            format!(
                "Large number of possible combinations ({total_possible}). Generation may take a while."
            )
        });
        if warning.is_some() {
            warn!(total_possible, threshold = self.warning_threshold, "large schedule search space");
        }

        let options: Vec<Vec<&ClassSection>> = candidates
            .into_iter()
            .map(|(_, sections)| sections)
            .filter(|sections| !sections.is_empty())
            .collect();
        debug!(
            courses = request.courses.len(),
            non_empty = options.len(),
            total_possible,
            ?limit,
            "generating schedule combinations"
        );

        let mut result = GenerationResult {
            combinations: Vec::new(),
            total_generated: 0,
            total_possible,
            total_checked: 0,
            warning,
            stop_reason: None,
        };
        if options.is_empty() {
            return result;
        }

        let table = ConflictTable::build(&options, &request.preferences);
        let mut rng = match self.id_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let mut used_ids = HashSet::new();
        let mut cursor = vec![0usize; options.len()];
        let mut chosen = Vec::with_capacity(options.len());

        loop {
            if let Some(reason) = self.interrupted(deadline) {
                debug!(?reason, checked = result.total_checked, "generation interrupted");
                result.stop_reason = Some(reason);
                break;
            }
            result.total_checked += 1;

            chosen.clear();
            chosen.extend(cursor.iter().enumerate().map(|(course, &idx)| table.offsets[course] + idx));

            if !table.has_internal_conflict(&chosen) && !table.hits_blocked(&chosen) {
                let sections: Vec<ClassSection> = cursor
                    .iter()
                    .enumerate()
                    .map(|(course, &idx)| (*options[course][idx]).clone())
                    .collect();
                let total_credits = sections
                    .iter()
                    .map(|s| self.credits.get(&s.course_code).copied().unwrap_or(0))
                    .fold(0u32, u32::saturating_add);
                let id = fresh_id(&mut rng, &mut used_ids);
                result.combinations.push(
                    ScheduleCombination::new(id, sections, &request.preferences)
                        .with_total_credits(total_credits),
                );

                if limit.is_some_and(|l| result.combinations.len() >= l) {
                    result.stop_reason = Some(StopReason::Limit);
                    break;
                }
            }

            if !advance(&mut cursor, &options) {
                break;
            }
        }

        result.total_generated = result.combinations.len() as u64;
        info!(
            generated = result.total_generated,
            checked = result.total_checked,
            possible = result.total_possible,
            "schedule generation finished"
        );
        result
    }

    fn interrupted(&self, deadline: Option<Instant>) -> Option<StopReason> {
        if self
            .cancel_flag
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
        {
            return Some(StopReason::Cancelled);
        }
        if deadline.is_some_and(|d| Instant::now() >= d) {
            return Some(StopReason::Deadline);
        }
        None
    }
}

/// Generates combinations with default settings.
pub fn generate_combinations(request: &GenerationRequest) -> GenerationResult {
    CombinationGenerator::new().generate(request)
}

/// Candidate sections per distinct course, in first-appearance order.
///
/// Entries with the same normalized code are merged. A section listed under
/// a course other than its own is dropped.
fn candidate_lists(courses: &[CourseSections]) -> Vec<(String, Vec<&ClassSection>)> {
    let mut lists: Vec<(String, Vec<&ClassSection>)> = Vec::new();
    for entry in courses {
        let code = normalize_code(&entry.course_code);
        let idx = match lists.iter().position(|(c, _)| *c == code) {
            Some(idx) => idx,
            None => {
                lists.push((code.clone(), Vec::new()));
                lists.len() - 1
            }
        };
        for section in &entry.sections {
            if section.course_code == code {
                lists[idx].1.push(section);
            } else {
                warn!(
                    course = %code,
                    section = %section.section_code,
                    owner = %section.course_code,
                    "section listed under another course dropped"
                );
            }
        }
    }
    lists
}

/// Precomputed conflict data over all candidate sections.
///
/// Sections are addressed by a flat index: `offsets[course] + position`.
struct ConflictTable {
    offsets: Vec<usize>,
    conflicts: Vec<Vec<bool>>,
    blocked: Vec<bool>,
}

impl ConflictTable {
    fn build(options: &[Vec<&ClassSection>], preferences: &[SlotPreference]) -> Self {
        let mut offsets = Vec::with_capacity(options.len());
        let mut flat: Vec<(usize, &ClassSection)> = Vec::new();
        for (course, sections) in options.iter().enumerate() {
            offsets.push(flat.len());
            flat.extend(sections.iter().map(|&s| (course, s)));
        }

        let n = flat.len();
        let mut conflicts = vec![vec![false; n]; n];
        for i in 0..n {
            for j in (i + 1)..n {
                // Sections of the same course never meet in one tuple.
                if flat[i].0 != flat[j].0 && flat[i].1.conflicts_with(flat[j].1) {
                    conflicts[i][j] = true;
                    conflicts[j][i] = true;
                }
            }
        }

        let blocked_slots = blocked_blocks(preferences);
        let blocked = flat
            .iter()
            .map(|(_, s)| s.conflicts_with_blocks(&blocked_slots))
            .collect();

        Self {
            offsets,
            conflicts,
            blocked,
        }
    }

    fn has_internal_conflict(&self, chosen: &[usize]) -> bool {
        chosen
            .iter()
            .enumerate()
            .any(|(i, &a)| chosen[i + 1..].iter().any(|&b| self.conflicts[a][b]))
    }

    fn hits_blocked(&self, chosen: &[usize]) -> bool {
        chosen.iter().any(|&s| self.blocked[s])
    }
}

/// Advances the odometer; returns `false` after the last tuple.
fn advance(cursor: &mut [usize], options: &[Vec<&ClassSection>]) -> bool {
    for pos in (0..cursor.len()).rev() {
        cursor[pos] += 1;
        if cursor[pos] < options[pos].len() {
            return true;
        }
        cursor[pos] = 0;
    }
    false
}

/// Eight hex digits, unique within one generation call.
fn fresh_id(rng: &mut StdRng, used: &mut HashSet<String>) -> String {
    loop {
        let id = format!("{:08x}", rng.random::<u32>());
        if used.insert(id.clone()) {
            return id;
        }
    }
}

use lazy_static::lazy_static;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::Level;
use tracing_subscriber::{EnvFilter, prelude::*};
use tracing_timing::{Builder, Histogram};
use std::collections::HashMap;
use std::error::Error;
use std::sync::Arc;
use parking_lot::RwLock;
use std::time::{Duration, Instant};
use std::cell::RefCell;

const HISTOGRAM_MAX_NS: u64 = 60_000_000_000;
const HISTOGRAM_SIGFIG: u8 = 3;

// Categories for the different kinds of work a scan does
#[derive(Hash, Eq, PartialEq, Clone, Debug)]
pub enum OperationCategory {
    Scan,
    Scoring {
        subcategory: ScoringType,
    },
    Classification,
    Clustering,
    FileIO {
        subcategory: FileIOType,
    },
    Other,
}

#[derive(Hash, Eq, PartialEq, Clone, Debug)]
pub enum ScoringType {
    Candidate,
    Ranking,
}

#[derive(Hash, Eq, PartialEq, Clone, Debug)]
pub enum FileIOType {
    ConfigLoad,
    DataLoad,
    ResultsSave,
}

impl OperationCategory {
    pub fn as_str(&self) -> String {
        match self {
            OperationCategory::Scan => "Scan".to_string(),
            OperationCategory::Scoring { subcategory } => {
                format!("Scoring - {}", match subcategory {
                    ScoringType::Candidate => "Candidate Assessment",
                    ScoringType::Ranking => "Ranking",
                })
            },
            OperationCategory::Classification => "Site Classification".to_string(),
            OperationCategory::Clustering => "Clustering".to_string(),
            OperationCategory::FileIO { subcategory } => {
                format!("File I/O - {}", match subcategory {
                    FileIOType::ConfigLoad => "Config Load",
                    FileIOType::DataLoad => "Data Load",
                    FileIOType::ResultsSave => "Results Save",
                })
            },
            OperationCategory::Other => "Other Operations".to_string(),
        }
    }
}

thread_local! {
    static TIMING_STACK: RefCell<Vec<String>> = RefCell::new(Vec::new());
}

lazy_static! {
    static ref TIMING_ENABLED: AtomicBool = AtomicBool::new(false);
    static ref FUNCTION_TIMINGS: Arc<RwLock<HashMap<String, Histogram<u64>>>> = Arc::new(RwLock::new(HashMap::new()));
    static ref CATEGORY_TIMINGS: Arc<RwLock<HashMap<OperationCategory, Histogram<u64>>>> = Arc::new(RwLock::new(HashMap::new()));
    static ref HIERARCHICAL_TIMINGS: Arc<RwLock<HashMap<String, (Duration, usize, Vec<String>)>>> = Arc::new(RwLock::new(HashMap::new()));
}

/// Records the elapsed time of a scope when dropped. Inert unless timing is enabled.
pub struct TimingGuard {
    function_name: String,
    category: OperationCategory,
    start: Instant,
    active: bool,
}

impl Drop for TimingGuard {
    fn drop(&mut self) {
        if !self.active {
            return;
        }
        let duration = self.start.elapsed();
        record_timing_end(&self.function_name, duration, &self.category);
    }
}

pub fn start_timing(function_name: &str, category: OperationCategory) -> TimingGuard {
    let active = is_timing_enabled();
    if active {
        TIMING_STACK.with(|stack| stack.borrow_mut().push(function_name.to_string()));
    }

    TimingGuard {
        function_name: function_name.to_string(),
        category,
        start: Instant::now(),
        active,
    }
}

fn new_histogram() -> Option<Histogram<u64>> {
    Histogram::<u64>::new_with_bounds(1, HISTOGRAM_MAX_NS, HISTOGRAM_SIGFIG).ok()
}

fn record_timing_end(function_name: &str, duration: Duration, category: &OperationCategory) {
    let duration_ns = duration.as_nanos().min(HISTOGRAM_MAX_NS as u128) as u64;

    // Pop our own frame, then note who called us
    TIMING_STACK.with(|stack| {
        let mut stack = stack.borrow_mut();
        stack.pop();

        let mut hierarchical = HIERARCHICAL_TIMINGS.write();
        let entry = hierarchical
            .entry(function_name.to_string())
            .or_insert((Duration::from_nanos(0), 0, Vec::new()));
        entry.0 += duration;
        entry.1 += 1;

        if let Some(parent_name) = stack.last() {
            if !entry.2.contains(parent_name) {
                entry.2.push(parent_name.clone());
            }
        }
    });

    {
        let mut timings = FUNCTION_TIMINGS.write();
        if !timings.contains_key(function_name) {
            if let Some(histogram) = new_histogram() {
                timings.insert(function_name.to_string(), histogram);
            }
        }
        if let Some(histogram) = timings.get_mut(function_name) {
            let _ = histogram.record(duration_ns.max(1));
        }
    }

    {
        let mut category_timings = CATEGORY_TIMINGS.write();
        if !category_timings.contains_key(category) {
            if let Some(histogram) = new_histogram() {
                category_timings.insert(category.clone(), histogram);
            }
        }
        if let Some(histogram) = category_timings.get_mut(category) {
            let _ = histogram.record(duration_ns.max(1));
        }
    }
}

/// Installs the global tracing subscriber. `debug` lowers this crate's level to DEBUG.
pub fn init_logging(enable_timing: bool, debug: bool) -> Result<(), Box<dyn Error + Send + Sync>> {
    TIMING_ENABLED.store(enable_timing, Ordering::SeqCst);

    let crate_level = if debug { "eirwind=debug" } else { "eirwind=info" };
    let env_filter = EnvFilter::from_default_env()
        .add_directive(Level::WARN.into())
        .add_directive(crate_level.parse()?);

    if enable_timing {
        let timing_layer = Builder::default().layer(|| {
            Histogram::<u64>::new_with_bounds(1, HISTOGRAM_MAX_NS, HISTOGRAM_SIGFIG)
                .expect("static histogram bounds are valid")
        });

        let subscriber = tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().compact())
            .with(timing_layer.boxed());

        tracing::subscriber::set_global_default(subscriber)?;
    } else {
        let subscriber = tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().compact());

        tracing::subscriber::set_global_default(subscriber)?;
    }

    Ok(())
}

pub fn is_timing_enabled() -> bool {
    TIMING_ENABLED.load(Ordering::SeqCst)
}

pub fn print_timing_report() {
    if !is_timing_enabled() {
        return;
    }

    println!("\nDetailed Performance Report");
    println!("==========================");

    println!("\nHierarchical Timing Analysis:");
    println!("---------------------------");
    let hierarchical = HIERARCHICAL_TIMINGS.read();
    let mut entries: Vec<_> = hierarchical.iter().collect();
    entries.sort_by(|a, b| b.1.0.cmp(&a.1.0));

    for (function_name, (total_duration, count, parents)) in entries {
        let avg_duration = total_duration.div_f64(*count as f64);
        println!(
            "{}: total={:.2}s, count={}, avg={:.3}ms{}",
            function_name,
            total_duration.as_secs_f64(),
            count,
            avg_duration.as_secs_f64() * 1000.0,
            if !parents.is_empty() {
                format!("\n  Called by: {}", parents.join(", "))
            } else {
                String::new()
            }
        );
    }

    println!("\nPerformance by Category:");
    println!("------------------------");
    let category_timings = CATEGORY_TIMINGS.read();
    let mut category_vec: Vec<_> = category_timings.iter().collect();
    category_vec.sort_by(|a, b| {
        let b_total = b.1.mean() * (b.1.len() as f64);
        let a_total = a.1.mean() * (a.1.len() as f64);
        b_total.partial_cmp(&a_total).unwrap_or(std::cmp::Ordering::Equal)
    });

    let total_time: f64 = category_vec.iter()
        .map(|(_, hist)| hist.mean() * (hist.len() as f64))
        .sum();

    for (category, histogram) in category_vec {
        let category_total = histogram.mean() * (histogram.len() as f64);
        let percentage = if total_time > 0.0 { (category_total / total_time) * 100.0 } else { 0.0 };
        println!(
            "{}: {:.1}% of total time\n  mean={:.3}ms, p95={:.3}ms, p99={:.3}ms, count={}, total={:.2}s",
            category.as_str(),
            percentage,
            histogram.mean() / 1_000_000.0,
            histogram.value_at_quantile(0.95) as f64 / 1_000_000.0,
            histogram.value_at_quantile(0.99) as f64 / 1_000_000.0,
            histogram.len(),
            category_total / 1_000_000_000.0,
        );
    }

    println!("==========================\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_names() {
        assert_eq!(OperationCategory::Scan.as_str(), "Scan");
        assert_eq!(
            OperationCategory::FileIO { subcategory: FileIOType::DataLoad }.as_str(),
            "File I/O - Data Load"
        );
        assert_eq!(
            OperationCategory::Scoring { subcategory: ScoringType::Ranking }.as_str(),
            "Scoring - Ranking"
        );
    }

    #[test]
    fn test_guard_is_inert_when_timing_disabled() {
        TIMING_ENABLED.store(false, Ordering::SeqCst);
        {
            let _timing = start_timing("inert_scope", OperationCategory::Other);
        }
        TIMING_STACK.with(|stack| assert!(stack.borrow().is_empty()));
        assert!(!HIERARCHICAL_TIMINGS.read().contains_key("inert_scope"));
    }
}

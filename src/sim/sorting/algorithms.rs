//! Sorting algorithms compiled to animation scripts
//!
//! Each algorithm sorts a scratch copy of the values and records every
//! comparison and write as an [`AnimationStep`]. Replaying the script over
//! the input values yields the sorted array.

use serde::{Deserialize, Serialize};

/// One visual event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationStep {
    Compare(usize, usize),
    /// Both bars after the swap
    Swap {
        indices: (usize, usize),
        values: (u32, u32),
    },
    Overwrite { index: usize, value: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Bubble,
    #[default]
    Quick,
    Merge,
    Heap,
    Insertion,
    Bucket,
}

impl Algorithm {
    pub const ALL: [Algorithm; 6] = [
        Algorithm::Bubble,
        Algorithm::Quick,
        Algorithm::Merge,
        Algorithm::Heap,
        Algorithm::Insertion,
        Algorithm::Bucket,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Bubble => "Bubble Sort",
            Self::Quick => "Quick Sort",
            Self::Merge => "Merge Sort",
            Self::Heap => "Heap Sort",
            Self::Insertion => "Insertion Sort",
            Self::Bucket => "Bucket Sort",
        }
    }

    /// Short key used by the host's selector buttons
    pub fn key(self) -> &'static str {
        match self {
            Self::Bubble => "bubble",
            Self::Quick => "quick",
            Self::Merge => "merge",
            Self::Heap => "heap",
            Self::Insertion => "insertion",
            Self::Bucket => "bucket",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.key() == key)
    }

    pub fn complexity(self) -> &'static str {
        match self {
            Self::Bubble | Self::Insertion => "O(n²)",
            Self::Quick | Self::Merge | Self::Heap => "O(n log n)",
            Self::Bucket => "O(n + k)",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Bubble => {
                "Repeatedly steps through the list, compares adjacent elements and swaps them if they are in the wrong order."
            }
            Self::Quick => {
                "Divides the array into sub-arrays by selecting a \"pivot\" element and sorting elements around it."
            }
            Self::Merge => "Divides the array into halves, sorts them, and then merges the sorted halves.",
            Self::Heap => "Converts the array into a heap structure, then repeatedly extracts the max element.",
            Self::Insertion => "Builds the final sorted array one item at a time by comparisons.",
            Self::Bucket => {
                "Distributes elements into a number of buckets, then sorts each bucket individually."
            }
        }
    }

    /// Listing shown next to the bars
    pub fn code(self) -> &'static str {
        match self {
            Self::Bubble => BUBBLE_CODE,
            Self::Quick => QUICK_CODE,
            Self::Merge => MERGE_CODE,
            Self::Heap => HEAP_CODE,
            Self::Insertion => INSERTION_CODE,
            Self::Bucket => BUCKET_CODE,
        }
    }

    /// 1-based line of [`Algorithm::code`] to highlight for a step
    pub fn highlight_line(self, step: &AnimationStep) -> usize {
        use AnimationStep::*;
        match (self, step) {
            (Self::Bubble, Compare(..)) => 7,
            (Self::Bubble, _) => 8,
            (Self::Quick, Compare(..)) => 8,
            (Self::Quick, _) => 4,
            (Self::Merge, Overwrite { .. }) => 9,
            (Self::Merge, _) => 5,
            (Self::Heap, Swap { .. }) => 8,
            (Self::Heap, _) => 9,
            (Self::Insertion, Compare(..)) => 7,
            (Self::Insertion, _) => 8,
            (Self::Bucket, Compare(..)) => 6,
            (Self::Bucket, _) => 10,
        }
    }

    /// Sort a copy of `values` and return the animation script
    pub fn compile(self, values: &[u32]) -> Vec<AnimationStep> {
        let mut scratch = values.to_vec();
        match self {
            Self::Bubble => bubble(&mut scratch),
            Self::Quick => quick(&mut scratch),
            Self::Merge => merge(&mut scratch),
            Self::Heap => heap(&mut scratch),
            Self::Insertion => insertion(&mut scratch),
            Self::Bucket => bucket(&scratch),
        }
    }
}

const BUBBLE_CODE: &str = "function bubbleSort(arr) {
  let n = arr.length;
  let swapped;
  do {
    swapped = false; // Reset flag
    for (let i = 0; i < n - 1; i++) {
      if (arr[i] > arr[i + 1]) {
        swap(arr, i, i + 1);
        swapped = true;
      }
    }
  } while (swapped);
}";

const QUICK_CODE: &str = "function quickSort(arr, low, high) {
  if (low < high) {
    // Partition array
    let pi = partition(arr, low, high);

    // Sort sub-arrays
    quickSort(arr, low, pi - 1);
    quickSort(arr, pi + 1, high);
  }
}";

const MERGE_CODE: &str = "function mergeSort(arr) {
  if (arr.length <= 1) return arr;

  const mid = Math.floor(len / 2);
  const left = mergeSort(arr.slice(0, mid));
  const right = mergeSort(arr.slice(mid));

  return merge(left, right);
}";

const HEAP_CODE: &str = "function heapSort(arr) {
  // Build Max Heap
  for (let i = n / 2 - 1; i >= 0; i--)
    heapify(arr, n, i);

  // Extract max element
  for (let i = n - 1; i > 0; i--) {
    swap(arr, 0, i);
    heapify(arr, i, 0);
  }
}";

const INSERTION_CODE: &str = "function insertionSort(arr) {
  for (let i = 1; i < n; i++) {
    let key = arr[i];
    let j = i - 1;

    while (j >= 0 && arr[j] > key) {
      arr[j + 1] = arr[j];
      j--;
    }
    arr[j + 1] = key;
  }
}";

const BUCKET_CODE: &str = "function bucketSort(arr) {
  const buckets = createBuckets(10);

  // Distribute
  for (let val of arr) {
    buckets[getIdx(val)].push(val);
  }

  // Sort & Merge
  return buckets.flatMap(b => b.sort());
}";

fn swap_step(arr: &mut [u32], a: usize, b: usize) -> AnimationStep {
    arr.swap(a, b);
    AnimationStep::Swap {
        indices: (a, b),
        values: (arr[a], arr[b]),
    }
}

fn bubble(arr: &mut [u32]) -> Vec<AnimationStep> {
    let mut steps = Vec::new();
    let n = arr.len();
    loop {
        let mut swapped = false;
        for i in 0..n.saturating_sub(1) {
            steps.push(AnimationStep::Compare(i, i + 1));
            if arr[i] > arr[i + 1] {
                steps.push(swap_step(arr, i, i + 1));
                swapped = true;
            }
        }
        if !swapped {
            return steps;
        }
    }
}

fn quick(arr: &mut [u32]) -> Vec<AnimationStep> {
    let mut steps = Vec::new();
    if !arr.is_empty() {
        quick_range(arr, 0, arr.len() - 1, &mut steps);
    }
    steps
}

/// Lomuto partition over the inclusive range, last element as pivot
fn quick_range(arr: &mut [u32], low: usize, high: usize, steps: &mut Vec<AnimationStep>) {
    if low >= high {
        return;
    }
    let pivot = arr[high];
    let mut store = low;
    for j in low..high {
        steps.push(AnimationStep::Compare(j, high));
        if arr[j] < pivot {
            steps.push(swap_step(arr, store, j));
            store += 1;
        }
    }
    steps.push(swap_step(arr, store, high));

    if store > low {
        quick_range(arr, low, store - 1, steps);
    }
    quick_range(arr, store + 1, high, steps);
}

/// Top-down merge sort ping-ponging between the array and one auxiliary copy
fn merge(arr: &mut [u32]) -> Vec<AnimationStep> {
    let mut steps = Vec::new();
    if arr.len() <= 1 {
        return steps;
    }
    let mut aux = arr.to_vec();
    let end = arr.len() - 1;
    merge_range(arr, &mut aux, 0, end, &mut steps);
    steps
}

fn merge_range(main: &mut [u32], aux: &mut [u32], start: usize, end: usize, steps: &mut Vec<AnimationStep>) {
    if start == end {
        return;
    }
    let mid = (start + end) / 2;
    merge_range(aux, main, start, mid, steps);
    merge_range(aux, main, mid + 1, end, steps);
    merge_halves(main, aux, start, mid, end, steps);
}

fn merge_halves(main: &mut [u32], aux: &[u32], start: usize, mid: usize, end: usize, steps: &mut Vec<AnimationStep>) {
    let (mut i, mut j) = (start, mid + 1);
    for k in start..=end {
        // Exhausted halves still flash their own bar
        let from = if i <= mid && j <= end {
            steps.push(AnimationStep::Compare(i, j));
            if aux[i] <= aux[j] {
                &mut i
            } else {
                &mut j
            }
        } else if i <= mid {
            steps.push(AnimationStep::Compare(i, i));
            &mut i
        } else {
            steps.push(AnimationStep::Compare(j, j));
            &mut j
        };
        let value = aux[*from];
        *from += 1;
        steps.push(AnimationStep::Overwrite { index: k, value });
        main[k] = value;
    }
}

fn heap(arr: &mut [u32]) -> Vec<AnimationStep> {
    let mut steps = Vec::new();
    let n = arr.len();
    for i in (0..n / 2).rev() {
        sift_down(arr, n, i, &mut steps);
    }
    for end in (1..n).rev() {
        steps.push(AnimationStep::Compare(0, end));
        steps.push(swap_step(arr, 0, end));
        sift_down(arr, end, 0, &mut steps);
    }
    steps
}

fn sift_down(arr: &mut [u32], n: usize, root: usize, steps: &mut Vec<AnimationStep>) {
    let mut i = root;
    loop {
        let mut largest = i;
        let (left, right) = (2 * i + 1, 2 * i + 2);
        if left < n {
            steps.push(AnimationStep::Compare(largest, left));
            if arr[left] > arr[largest] {
                largest = left;
            }
        }
        if right < n {
            steps.push(AnimationStep::Compare(largest, right));
            if arr[right] > arr[largest] {
                largest = right;
            }
        }
        if largest == i {
            return;
        }
        steps.push(swap_step(arr, i, largest));
        i = largest;
    }
}

/// Only the comparisons that lead to a swap are recorded
fn insertion(arr: &mut [u32]) -> Vec<AnimationStep> {
    let mut steps = Vec::new();
    for i in 1..arr.len() {
        let mut j = i;
        while j > 0 && arr[j] < arr[j - 1] {
            steps.push(AnimationStep::Compare(j, j - 1));
            steps.push(swap_step(arr, j, j - 1));
            j -= 1;
        }
    }
    steps
}

pub const BUCKET_COUNT: usize = 10;
/// Value range the buckets span
pub const BUCKET_RANGE: (u32, u32) = (0, 100);

fn bucket(arr: &[u32]) -> Vec<AnimationStep> {
    let mut steps = Vec::new();
    let (min, max) = BUCKET_RANGE;
    let mut buckets: Vec<Vec<u32>> = vec![Vec::new(); BUCKET_COUNT];

    for (i, &value) in arr.iter().enumerate() {
        steps.push(AnimationStep::Compare(i, i));
        let scaled = f64::from(value.saturating_sub(min)) / f64::from(max - min + 1) * BUCKET_COUNT as f64;
        let idx = (scaled.floor() as usize).min(BUCKET_COUNT - 1);
        buckets[idx].push(value);
    }

    let mut k = 0;
    for bucket in &mut buckets {
        bucket.sort_unstable();
        for &value in bucket.iter() {
            steps.push(AnimationStep::Overwrite { index: k, value });
            k += 1;
        }
    }
    steps
}

/// Replay a script over `values` in place
pub fn apply(values: &mut [u32], steps: &[AnimationStep]) {
    for step in steps {
        match *step {
            AnimationStep::Compare(..) => {}
            AnimationStep::Swap {
                indices: (a, b),
                values: (va, vb),
            } => {
                values[a] = va;
                values[b] = vb;
            }
            AnimationStep::Overwrite { index, value } => values[index] = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    fn random_values(seed: u64, n: usize) -> Vec<u32> {
        let mut rng = Pcg32::seed_from_u64(seed);
        (0..n).map(|_| rng.random_range(10..=100)).collect()
    }

    fn is_sorted(values: &[u32]) -> bool {
        values.windows(2).all(|w| w[0] <= w[1])
    }

    #[test]
    fn test_every_script_sorts() {
        for seed in 0..20 {
            let original = random_values(seed, 60);
            for algorithm in Algorithm::ALL {
                let script = algorithm.compile(&original);
                let mut replay = original.clone();
                apply(&mut replay, &script);
                assert!(is_sorted(&replay), "{} seed {seed}", algorithm.name());

                let mut expected = original.clone();
                expected.sort_unstable();
                assert_eq!(replay, expected);
            }
        }
    }

    #[test]
    fn test_compile_leaves_input_untouched() {
        let values = vec![5, 3, 9, 1];
        let _ = Algorithm::Quick.compile(&values);
        assert_eq!(values, vec![5, 3, 9, 1]);
    }

    #[test]
    fn test_bubble_on_sorted_input_single_pass() {
        let script = Algorithm::Bubble.compile(&[1, 2, 3, 4, 5]);
        assert_eq!(script.len(), 4);
        assert!(script.iter().all(|s| matches!(s, AnimationStep::Compare(..))));
    }

    #[test]
    fn test_insertion_records_only_swapping_compares() {
        assert!(Algorithm::Insertion.compile(&[1, 2, 3]).is_empty());
        let script = Algorithm::Insertion.compile(&[2, 1]);
        assert_eq!(
            script,
            vec![
                AnimationStep::Compare(1, 0),
                AnimationStep::Swap {
                    indices: (1, 0),
                    values: (2, 1)
                },
            ]
        );
    }

    #[test]
    fn test_merge_writes_every_index_at_top_level() {
        let values = random_values(3, 16);
        let script = Algorithm::Merge.compile(&values);
        let writes = script
            .iter()
            .filter(|s| matches!(s, AnimationStep::Overwrite { .. }))
            .count();
        // Four levels of 16 writes each
        assert_eq!(writes, 64);
        assert!(Algorithm::Merge.compile(&[7]).is_empty());
    }

    #[test]
    fn test_bucket_one_compare_and_write_per_value() {
        let values = random_values(8, 60);
        let script = Algorithm::Bucket.compile(&values);
        let compares = script
            .iter()
            .filter(|s| matches!(s, AnimationStep::Compare(..)))
            .count();
        assert_eq!(compares, 60);
        assert_eq!(script.len(), 120);
        assert!(Algorithm::Bucket.compile(&[]).is_empty());
    }

    #[test]
    fn test_empty_and_single_inputs() {
        for algorithm in Algorithm::ALL {
            assert!(algorithm.compile(&[]).is_empty(), "{}", algorithm.name());
            let mut one = vec![42];
            apply(&mut one, &algorithm.compile(&[42]));
            assert_eq!(one, vec![42]);
        }
    }

    #[test]
    fn test_highlight_lines_within_listing() {
        let steps = [
            AnimationStep::Compare(0, 1),
            AnimationStep::Swap {
                indices: (0, 1),
                values: (1, 2),
            },
            AnimationStep::Overwrite { index: 0, value: 1 },
        ];
        for algorithm in Algorithm::ALL {
            let lines = algorithm.code().lines().count();
            for step in &steps {
                let line = algorithm.highlight_line(step);
                assert!((1..=lines).contains(&line), "{} line {line}", algorithm.name());
            }
        }
    }

    #[test]
    fn test_keys_round_trip() {
        for algorithm in Algorithm::ALL {
            assert_eq!(Algorithm::from_key(algorithm.key()), Some(algorithm));
        }
        assert_eq!(Algorithm::from_key("bogo"), None);
        assert_eq!(serde_json::to_string(&Algorithm::Heap).expect("serializable"), "\"heap\"");
    }
}

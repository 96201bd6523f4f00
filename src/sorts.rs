// Step-by-step sorting state machines.
//
// Each sorter performs exactly one primitive reordering action (a swap or a
// backward shift) per `advance` call, then hands control back to the render
// loop together with the indices it touched. `None` signals exhaustion;
// advancing an exhausted sorter stays a no-op.

/// Comparison direction, fixed for the duration of one sort run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    /// True when `a` placed before `b` violates this order.
    fn misordered(self, a: i32, b: i32) -> bool {
        match self {
            SortOrder::Ascending => a > b,
            SortOrder::Descending => a < b,
        }
    }

    // Inclusive on purpose: equal elements cross the pivot boundary.
    fn keeps_left_of_pivot(self, v: i32, pivot: i32) -> bool {
        match self {
            SortOrder::Ascending => v <= pivot,
            SortOrder::Descending => v >= pivot,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortOrder::Ascending => "Ascending",
            SortOrder::Descending => "Descending",
        }
    }
}

/// The supported algorithms, selectable while the visualizer is idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Bubble,
    Insertion,
    Selection,
    Quick,
}

impl Algorithm {
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Bubble => "Bubble Sort",
            Algorithm::Insertion => "Insertion Sort",
            Algorithm::Selection => "Selection Sort",
            Algorithm::Quick => "Quick Sort",
        }
    }

    /// Builds a fresh sorter bound to `order`, positioned before the first
    /// step.
    pub fn stepper(self, order: SortOrder) -> Box<dyn SortStepper> {
        match self {
            Algorithm::Bubble => Box::new(BubbleSort::new(order)),
            Algorithm::Insertion => Box::new(InsertionSort::new(order)),
            Algorithm::Selection => Box::new(SelectionSort::new(order)),
            Algorithm::Quick => Box::new(QuickSort::new(order)),
        }
    }
}

/// One primitive mutation of the working list.
///
/// `touched` holds the highlight pair, lead index first, or `None` for the
/// bookkeeping step quick sort emits when a partition level retires without
/// moving anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub touched: Option<[usize; 2]>,
}

impl Step {
    fn pair(lead: usize, trail: usize) -> Self {
        Step {
            touched: Some([lead, trail]),
        }
    }

    fn silent() -> Self {
        Step { touched: None }
    }
}

pub trait SortStepper {
    /// Performs one primitive action against `values` and reports which
    /// indices changed. Returns `None` once no actions remain, and keeps
    /// returning `None` on further calls.
    fn advance(&mut self, values: &mut [i32]) -> Option<Step>;
}

/// Adjacent-pair bubble sort. Comparisons that do not swap are silent, so a
/// step is produced only for an actual swap.
pub struct BubbleSort {
    order: SortOrder,
    pass: usize,
    j: usize,
}

impl BubbleSort {
    pub fn new(order: SortOrder) -> Self {
        BubbleSort {
            order,
            pass: 0,
            j: 0,
        }
    }
}

impl SortStepper for BubbleSort {
    fn advance(&mut self, values: &mut [i32]) -> Option<Step> {
        let n = values.len();
        while self.pass + 1 < n {
            while self.j + 1 < n - self.pass {
                let j = self.j;
                self.j += 1;
                if self.order.misordered(values[j], values[j + 1]) {
                    values.swap(j, j + 1);
                    return Some(Step::pair(j, j + 1));
                }
            }
            self.pass += 1;
            self.j = 0;
        }
        None
    }
}

/// Insertion sort that shifts by swapping the moving element backward one
/// slot at a time, one step per shift.
pub struct InsertionSort {
    order: SortOrder,
    outer: usize,
    cursor: usize,
}

impl InsertionSort {
    pub fn new(order: SortOrder) -> Self {
        InsertionSort {
            order,
            outer: 1,
            cursor: 1,
        }
    }
}

impl SortStepper for InsertionSort {
    fn advance(&mut self, values: &mut [i32]) -> Option<Step> {
        let n = values.len();
        while self.outer < n {
            if self.cursor > 0
                && self
                    .order
                    .misordered(values[self.cursor - 1], values[self.cursor])
            {
                values.swap(self.cursor - 1, self.cursor);
                self.cursor -= 1;
                return Some(Step::pair(self.cursor.saturating_sub(1), self.cursor));
            }
            self.outer += 1;
            self.cursor = self.outer;
        }
        None
    }
}

/// Selection sort. The scan for the extremal element happens inside a single
/// `advance`, so every outer position costs exactly one step, self-swaps
/// included.
pub struct SelectionSort {
    order: SortOrder,
    i: usize,
}

impl SelectionSort {
    pub fn new(order: SortOrder) -> Self {
        SelectionSort { order, i: 0 }
    }
}

impl SortStepper for SelectionSort {
    fn advance(&mut self, values: &mut [i32]) -> Option<Step> {
        let n = values.len();
        if self.i >= n {
            return None;
        }
        let i = self.i;
        let mut pick = i;
        for j in i + 1..n {
            if self.order.misordered(values[pick], values[j]) {
                pick = j;
            }
        }
        values.swap(i, pick);
        self.i += 1;
        Some(Step::pair(i.saturating_sub(1), i))
    }
}

// Quick sort runs on an explicit frame stack instead of call-stack recursion
// so it can suspend between steps. A `Sort` frame expands into a `Partition`
// scan; once the pivot lands, the two sub-ranges are pushed along with a
// `Retire` marker that emits the level's trailing step after both drain.
// Bounds are isize because `pivot - 1` may go below zero.
enum Frame {
    Sort { low: isize, high: isize },
    Partition { low: isize, high: isize, i: isize, j: isize },
    Retire,
}

/// Lomuto quick sort with the last element of the active range as pivot.
pub struct QuickSort {
    order: SortOrder,
    stack: Vec<Frame>,
    started: bool,
}

impl QuickSort {
    pub fn new(order: SortOrder) -> Self {
        QuickSort {
            order,
            stack: Vec::new(),
            started: false,
        }
    }
}

impl SortStepper for QuickSort {
    fn advance(&mut self, values: &mut [i32]) -> Option<Step> {
        if !self.started {
            self.started = true;
            self.stack.push(Frame::Sort {
                low: 0,
                high: values.len() as isize - 1,
            });
        }
        loop {
            match self.stack.pop()? {
                Frame::Sort { low, high } => {
                    // Ranges of length <= 1 vanish without a step.
                    if low < high {
                        self.stack.push(Frame::Partition {
                            low,
                            high,
                            i: low - 1,
                            j: low,
                        });
                    }
                }
                Frame::Partition {
                    low,
                    high,
                    mut i,
                    mut j,
                } => {
                    let pivot = values[high as usize];
                    while j < high {
                        let scan = j as usize;
                        j += 1;
                        if self.order.keeps_left_of_pivot(values[scan], pivot) {
                            i += 1;
                            values.swap(i as usize, scan);
                            self.stack.push(Frame::Partition { low, high, i, j });
                            return Some(Step::pair((i - 1).max(0) as usize, i as usize));
                        }
                    }
                    // Scan done: place the pivot and fan out the sub-ranges.
                    let p = i + 1;
                    values.swap(p as usize, high as usize);
                    self.stack.push(Frame::Retire);
                    self.stack.push(Frame::Sort { low: p + 1, high });
                    self.stack.push(Frame::Sort { low, high: p - 1 });
                    return Some(Step::pair((i - 1).max(0) as usize, i.max(0) as usize));
                }
                Frame::Retire => return Some(Step::silent()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const ALGORITHMS: [Algorithm; 4] = [
        Algorithm::Bubble,
        Algorithm::Insertion,
        Algorithm::Selection,
        Algorithm::Quick,
    ];

    fn run_to_exhaustion(
        algorithm: Algorithm,
        order: SortOrder,
        values: &mut Vec<i32>,
    ) -> Vec<Step> {
        let mut stepper = algorithm.stepper(order);
        let mut steps = Vec::new();
        while let Some(step) = stepper.advance(values) {
            steps.push(step);
            assert!(steps.len() <= 10_000, "sorter failed to terminate");
        }
        // Exhaustion is sticky and mutation-free.
        let snapshot = values.clone();
        assert_eq!(stepper.advance(values), None);
        assert_eq!(*values, snapshot);
        steps
    }

    fn is_ordered(values: &[i32], order: SortOrder) -> bool {
        values.windows(2).all(|w| match order {
            SortOrder::Ascending => w[0] <= w[1],
            SortOrder::Descending => w[0] >= w[1],
        })
    }

    fn inversions(values: &[i32]) -> usize {
        let mut count = 0;
        for i in 0..values.len() {
            for j in i + 1..values.len() {
                if values[i] > values[j] {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn every_algorithm_sorts_every_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let random: Vec<i32> = (0..50).map(|_| rng.gen_range(0..=100)).collect();
        let shapes: [&[i32]; 7] = [
            &random,
            &[5, 3, 3, 1, 3],
            &[1, 2, 3, 4],
            &[4, 3, 2, 1],
            &[7],
            &[],
            &[2, 2, 2, 2],
        ];
        for algorithm in ALGORITHMS {
            for order in [SortOrder::Ascending, SortOrder::Descending] {
                for shape in shapes {
                    let mut values = shape.to_vec();
                    run_to_exhaustion(algorithm, order, &mut values);
                    assert!(
                        is_ordered(&values, order),
                        "{} {:?} left {:?}",
                        algorithm.name(),
                        order,
                        values
                    );
                }
            }
        }
    }

    #[test]
    fn every_algorithm_preserves_the_multiset() {
        let mut rng = StdRng::seed_from_u64(11);
        let original: Vec<i32> = (0..50).map(|_| rng.gen_range(0..=100)).collect();
        for algorithm in ALGORITHMS {
            let mut values = original.clone();
            run_to_exhaustion(algorithm, SortOrder::Ascending, &mut values);
            let mut expected = original.clone();
            expected.sort_unstable();
            assert_eq!(values, expected, "{} lost values", algorithm.name());
        }
    }

    #[test]
    fn bubble_steps_once_per_swap() {
        let input = vec![9, 1, 8, 2, 7, 3];
        let expected = inversions(&input);
        let mut values = input;
        let steps = run_to_exhaustion(Algorithm::Bubble, SortOrder::Ascending, &mut values);
        assert_eq!(steps.len(), expected);
        let n = values.len();
        assert!(steps.len() <= n * (n - 1) / 2);
    }

    #[test]
    fn bubble_mutation_trace_matches_swap_cadence() {
        let mut values = vec![4, 2, 2, 1];
        let mut stepper = Algorithm::Bubble.stepper(SortOrder::Ascending);
        let mut trace = Vec::new();
        while stepper.advance(&mut values).is_some() {
            trace.push(values.clone());
        }
        assert_eq!(
            trace,
            vec![
                vec![2, 4, 2, 1],
                vec![2, 2, 4, 1],
                vec![2, 2, 1, 4],
                vec![2, 1, 2, 4],
                vec![1, 2, 2, 4],
            ]
        );
    }

    #[test]
    fn bubble_on_sorted_input_yields_nothing() {
        let mut values = vec![1, 2, 3, 4, 5];
        let steps = run_to_exhaustion(Algorithm::Bubble, SortOrder::Ascending, &mut values);
        assert!(steps.is_empty());
    }

    #[test]
    fn insertion_steps_once_per_shift() {
        let mut values = vec![3, 1, 2];
        let mut stepper = Algorithm::Insertion.stepper(SortOrder::Ascending);

        assert_eq!(stepper.advance(&mut values), Some(Step::pair(0, 0)));
        assert_eq!(values, vec![1, 3, 2]);
        assert_eq!(stepper.advance(&mut values), Some(Step::pair(0, 1)));
        assert_eq!(values, vec![1, 2, 3]);
        assert_eq!(stepper.advance(&mut values), None);
    }

    #[test]
    fn selection_yields_exactly_n_steps() {
        let mut values = vec![5, 3, 3, 1];
        let steps = run_to_exhaustion(Algorithm::Selection, SortOrder::Ascending, &mut values);
        assert_eq!(steps.len(), 4);
        assert!(steps.iter().all(|s| s.touched.is_some()));
        assert_eq!(values, vec![1, 3, 3, 5]);

        // Already-sorted input still pays one step per position.
        let mut sorted = vec![1, 2, 3];
        let steps = run_to_exhaustion(Algorithm::Selection, SortOrder::Ascending, &mut sorted);
        assert_eq!(steps.len(), 3);
    }

    #[test]
    fn quick_sort_trace_on_three_elements() {
        let mut values = vec![3, 1, 2];
        let mut stepper = Algorithm::Quick.stepper(SortOrder::Ascending);

        // Partition scan moves 1 left of the pivot.
        let step = stepper.advance(&mut values).unwrap();
        assert!(step.touched.is_some());
        assert_eq!(values, vec![1, 3, 2]);

        // Pivot placement.
        let step = stepper.advance(&mut values).unwrap();
        assert!(step.touched.is_some());
        assert_eq!(values, vec![1, 2, 3]);

        // Both sub-ranges are empty; the level retires with a silent step.
        assert_eq!(stepper.advance(&mut values), Some(Step::silent()));
        assert_eq!(stepper.advance(&mut values), None);
        assert_eq!(stepper.advance(&mut values), None);
    }

    #[test]
    fn quick_sort_descending_partitions_with_inclusive_compare() {
        let mut values = vec![3, 1, 2];
        let steps = run_to_exhaustion(Algorithm::Quick, SortOrder::Descending, &mut values);
        assert_eq!(values, vec![3, 2, 1]);
        // Scan swap, pivot swap, retire.
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[2], Step::silent());
    }

    #[test]
    fn quick_sort_handles_duplicate_heavy_input() {
        let mut values = vec![2, 2, 2, 1, 2, 0, 2];
        run_to_exhaustion(Algorithm::Quick, SortOrder::Ascending, &mut values);
        assert_eq!(values, vec![0, 1, 2, 2, 2, 2, 2]);
    }

    #[test]
    fn steppers_are_total_on_trivial_inputs() {
        for algorithm in ALGORITHMS {
            let mut empty: Vec<i32> = Vec::new();
            let mut stepper = algorithm.stepper(SortOrder::Ascending);
            assert_eq!(stepper.advance(&mut empty), None);

            let mut single = vec![42];
            let steps = run_to_exhaustion(algorithm, SortOrder::Descending, &mut single);
            assert_eq!(single, vec![42]);
            // Selection pays its one step even on a single element.
            if algorithm == Algorithm::Selection {
                assert_eq!(steps.len(), 1);
            }
        }
    }
}

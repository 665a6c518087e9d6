use crate::commit::{Lane, LaneEnd};
use crate::palette::Palette;

/// A lane that is still awaiting its next commit.
#[derive(Debug, Clone, PartialEq)]
struct OpenLane {
    /// Index into the allocator's lane list.
    lane: usize,
    column: usize,
    color: String,
    /// The parent hash this lane expects to arrive next.
    awaited: String,
    /// Refs of the most recent ref-carrying commit placed on the lane.
    last_refs: Vec<String>,
}

/// Lane transition recorded while placing commits; projected into curve
/// descriptors by the curve resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LaneTransition {
    MergeIn {
        from_column: usize,
        from_y: usize,
        to_column: usize,
        to_y: usize,
    },
    BranchOut {
        from_column: usize,
        from_y: usize,
        to_column: usize,
        to_y: usize,
    },
}

/// Single-pass greedy lane assignment.
///
/// Commits are placed in increasing row order. Each placement claims the
/// open lane awaiting the commit (opening a fresh one for branch heads),
/// terminates the other arrivals into it, and opens one extra lane per
/// additional parent of a merge commit. State left after the last row is the
/// seed for laying out the next, older page.
#[derive(Debug, Clone, Default)]
pub(crate) struct LaneAllocator {
    lanes: Vec<Lane>,
    open: Vec<OpenLane>,
    transitions: Vec<LaneTransition>,
    /// Total lanes ever opened; drives palette cycling.
    opened: usize,
}

impl LaneAllocator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    pub(crate) fn transitions(&self) -> &[LaneTransition] {
        &self.transitions
    }

    /// Place one commit at row `y`, returning its column and color.
    pub(crate) fn place(
        &mut self,
        y: usize,
        hash: &str,
        parents: &[String],
        refs: &[String],
        current_branch: Option<&str>,
        palette: &Palette,
    ) -> (usize, String) {
        let (mut arrived, remaining): (Vec<OpenLane>, Vec<OpenLane>) = std::mem::take(&mut self.open)
            .into_iter()
            .partition(|lane| lane.awaited == hash);
        self.open = remaining;

        // Columns of lanes terminated at this row stay reserved until the
        // next row, so a branch-out lane opened below never collides with
        // the merge-in curve.
        let mut reserved: Vec<usize> = Vec::new();

        let mut lane = if arrived.is_empty() {
            // Branch head with no child in the window, or the first commit.
            let column = self.lowest_free_column(&reserved);
            self.open_lane(column, y, palette)
        } else {
            // Keep the arrival carrying the checked-out branch if there is
            // one, else the leftmost; terminate the rest into it.
            arrived.sort_by_key(|lane| {
                let on_current_branch =
                    current_branch.is_some_and(|branch| lane.last_refs.iter().any(|r| r == branch));
                (!on_current_branch, lane.column)
            });
            let keep = arrived.remove(0);
            for gone in arrived {
                self.lanes[gone.lane].end = LaneEnd::Closed(y);
                reserved.push(gone.column);
                self.transitions.push(LaneTransition::MergeIn {
                    from_column: gone.column,
                    from_y: y - 1,
                    to_column: keep.column,
                    to_y: y,
                });
            }
            keep
        };

        let x = lane.column;
        let color = lane.color.clone();
        if !refs.is_empty() {
            lane.last_refs = refs.to_vec();
        }

        // The claimed lane awaits the mainline parent next, or closes at a
        // root commit.
        match parents.first() {
            Some(parent) => {
                lane.awaited = parent.clone();
                self.open.push(lane);
            }
            None => {
                self.lanes[lane.lane].end = LaneEnd::Closed(y);
            }
        }

        // Every additional parent of a merge commit gets its own lane.
        for parent in parents.iter().skip(1) {
            let column = self.lowest_free_column(&reserved);
            let mut branch_lane = self.open_lane(column, y, palette);
            branch_lane.awaited = parent.clone();
            self.transitions.push(LaneTransition::BranchOut {
                from_column: x,
                from_y: y,
                to_column: column,
                to_y: y,
            });
            self.open.push(branch_lane);
        }

        (x, color)
    }

    /// Lowest column not held by an open lane or reserved for this row.
    /// Columns of previously closed lanes are recycled, bounding peak width.
    fn lowest_free_column(&self, reserved: &[usize]) -> usize {
        let mut column = 0;
        while self.open.iter().any(|lane| lane.column == column) || reserved.contains(&column) {
            column += 1;
        }
        column
    }

    /// Append a lane record and hand back its open working state. The caller
    /// decides whether it goes into the open set.
    fn open_lane(&mut self, column: usize, start_y: usize, palette: &Palette) -> OpenLane {
        let color = palette.color(self.opened).to_string();
        self.opened += 1;
        let lane = self.lanes.len();
        self.lanes.push(Lane {
            column,
            start_y,
            end: LaneEnd::Open,
            color: color.clone(),
        });
        OpenLane {
            lane,
            column,
            color,
            awaited: String::new(),
            last_refs: Vec::new(),
        }
    }
}

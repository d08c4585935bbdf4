//! Way-level tag filtering

use hashbrown::HashSet;

use crate::model::RoadClass;

/// Tag predicate selecting which ways belong in a requested network.
///
/// A way is accepted when its `highway` tag parses to one of the
/// requested classes and it passes the drive-profile exclusions
/// (mapped areas, private access and private service ways are not part
/// of the public drivable network).
#[derive(Debug, Clone)]
pub struct WayFilter {
    classes: HashSet<RoadClass>,
}

impl WayFilter {
    pub fn new(classes: impl IntoIterator<Item = RoadClass>) -> Self {
        Self {
            classes: classes.into_iter().collect(),
        }
    }

    /// Evaluates the filter over a way's tags, returning the road
    /// class when the way is accepted.
    pub fn accept<'a>(
        &self,
        tags: impl Iterator<Item = (&'a str, &'a str)>,
    ) -> Option<RoadClass> {
        let mut class = None;
        for (key, value) in tags {
            match key {
                "highway" => class = value.parse::<RoadClass>().ok(),
                "area" if value == "yes" => return None,
                "access" if value == "private" => return None,
                "service" if value == "private" => return None,
                _ => {}
            }
        }
        class.filter(|c| self.classes.contains(c))
    }
}

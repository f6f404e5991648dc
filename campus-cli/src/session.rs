//! Line-oriented query session over a loaded campus map.
//!
//! Each line holds a one-letter command followed by optional text:
//! `b [name]`, `a [category]`, `f [building]` or `$`. Blank lines are
//! ignored and end of input ends the session like `$` does.

use std::io::{self, BufRead, Write};

use campus_core::{CampusMap, DISTANCE_DECIMALS, NearestOutcome, NearestReport, SearchOutcome};

const BANNER: &str = "** NU open street map **";
const PROMPT: &str = "Enter cmd (b, a, f) or $ to end>";
const FAREWELL: &str = "** Done **";
const CATEGORIES_PER_LINE: usize = 5;

/// A parsed session command borrowing its argument from the input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SessionCommand<'a> {
    Buildings(&'a str),
    Amenities(&'a str),
    Nearest(&'a str),
    Quit,
    Blank,
    Unknown,
}

impl<'a> SessionCommand<'a> {
    pub(crate) fn parse(line: &'a str) -> Self {
        let trimmed = line.trim();
        let (head, rest) = trimmed
            .split_once(char::is_whitespace)
            .unwrap_or((trimmed, ""));
        let argument = rest.trim();
        match head {
            "" => Self::Blank,
            "b" => Self::Buildings(argument),
            "a" => Self::Amenities(argument),
            "f" => Self::Nearest(argument),
            "$" => Self::Quit,
            _ => Self::Unknown,
        }
    }
}

/// Interactive session answering queries against one map.
pub(crate) struct Session<'a> {
    map: &'a CampusMap,
    nearest_category: &'a str,
}

impl<'a> Session<'a> {
    pub(crate) const fn new(map: &'a CampusMap, nearest_category: &'a str) -> Self {
        Self {
            map,
            nearest_category,
        }
    }

    /// Print the banner, then answer commands until `$` or end of input.
    pub(crate) fn run(&self, input: &mut dyn BufRead, output: &mut dyn Write) -> io::Result<()> {
        writeln!(output, "{BANNER}")?;
        writeln!(output)?;
        write_counts(self.map, output)?;

        let mut line = String::new();
        loop {
            writeln!(output)?;
            writeln!(output, "{PROMPT}")?;
            output.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                break;
            }
            match SessionCommand::parse(&line) {
                SessionCommand::Quit => break,
                SessionCommand::Blank => {}
                SessionCommand::Buildings(query) => self.buildings(query, output)?,
                SessionCommand::Amenities(query) => self.amenities(query, output)?,
                SessionCommand::Nearest(query) => self.nearest(query, output)?,
                SessionCommand::Unknown => {
                    writeln!(output, "Unknown command, please try again")?;
                }
            }
        }

        writeln!(output)?;
        writeln!(output, "{FAREWELL}")?;
        output.flush()
    }

    fn buildings(&self, query: &str, output: &mut dyn Write) -> io::Result<()> {
        match self.map.buildings().search(query) {
            SearchOutcome::Listing(all) => {
                for building in all {
                    writeln!(output, "{}", building.summary())?;
                }
            }
            SearchOutcome::Matches(found) => {
                for building in found {
                    write!(output, "{}", building.detail(self.map.positions()))?;
                }
            }
            SearchOutcome::NoMatches => writeln!(output, "No such building")?,
        }
        Ok(())
    }

    fn amenities(&self, query: &str, output: &mut dyn Write) -> io::Result<()> {
        match self.map.amenities().search(query) {
            SearchOutcome::Listing(_) => {
                for chunk in self.map.amenities().categories().chunks(CATEGORIES_PER_LINE) {
                    writeln!(output, "{}", chunk.join(" "))?;
                }
            }
            SearchOutcome::Matches(found) => {
                for amenity in found {
                    write!(output, "{}", amenity.detail(self.map.positions()))?;
                }
            }
            SearchOutcome::NoMatches => writeln!(output, "No such amenity")?,
        }
        Ok(())
    }

    fn nearest(&self, query: &str, output: &mut dyn Write) -> io::Result<()> {
        let NearestReport::Results(outcomes) = self.map.nearest(query, self.nearest_category)
        else {
            return writeln!(output, "No such building");
        };
        for outcome in outcomes {
            match outcome {
                NearestOutcome::Found {
                    anchor,
                    amenity,
                    distance_miles,
                } => {
                    writeln!(output, "{anchor}")?;
                    writeln!(output, "{}", amenity.summary())?;
                    writeln!(
                        output,
                        " Distance: {:.*} miles",
                        DISTANCE_DECIMALS, distance_miles
                    )?;
                }
                NearestOutcome::NoAmenityFound { anchor } => {
                    writeln!(output, "{anchor}")?;
                    writeln!(output, "No {} found", self.nearest_category)?;
                }
                NearestOutcome::LocationUnknown { anchor } => {
                    writeln!(output, "{anchor}")?;
                    writeln!(output, " Location unknown")?;
                }
            }
        }
        Ok(())
    }
}

/// Write the node, building and amenity counts shown at session start.
pub(crate) fn write_counts(map: &CampusMap, output: &mut dyn Write) -> io::Result<()> {
    let summary = map.summary();
    writeln!(output, "# of nodes:     {}", summary.positions)?;
    writeln!(output, "# of buildings: {}", summary.buildings)?;
    writeln!(output, "# of amenity types: {}", summary.amenity_categories)?;
    writeln!(output, "# of amenities:     {}", summary.amenities)
}

// People endpoints
//
// The people list drives per-person reading discovery; statistics are
// fetched per person id.

use tracing::debug;

use crate::client::ImmichClient;
use crate::error::Error;
use crate::models::{PeopleSnapshot, PersonStatistics};

impl ImmichClient {
    /// Recognized people plus the server's total and hidden counters.
    ///
    /// `GET /api/people`
    pub async fn get_people(&self) -> Result<PeopleSnapshot, Error> {
        let snapshot: PeopleSnapshot = self.get(&["api", "people"]).await?;
        debug!(
            people = snapshot.people.len(),
            total = snapshot.total,
            hidden = snapshot.hidden,
            "retrieved people"
        );
        Ok(snapshot)
    }

    /// Asset count for one person.
    ///
    /// `GET /api/people/{id}/statistics`
    pub async fn get_person_statistics(&self, person_id: &str) -> Result<PersonStatistics, Error> {
        let stats: PersonStatistics = self
            .get(&["api", "people", person_id, "statistics"])
            .await?;
        debug!(person_id, assets = stats.assets, "person statistics");
        Ok(stats)
    }
}

use shared::dto::StatsDto;

use crate::{error::MapperError, mappers::Mapper, models::Stats};

pub struct StatsMapper;

impl Mapper for StatsMapper {
    type Dto = StatsDto;
    type Model = Stats;

    const NAME: &'static str = "StatsMapper";

    fn create_model_from_dto(&self, dto: StatsDto) -> Result<Stats, MapperError> {
        Ok(Stats {
            organizations: dto.organizations_count,
            teams: dto.teams_count,
            participants: dto.participants_count,
            responses: dto.responses_count,
            generated_at: dto.generated_at,
        })
    }
}

use shared::dto::{
    GeneralSurveyResponseDto, MinMaxResponseDto, OverconfidenceSurveyResponseDto,
    SurveyResponseDto, TeamCoordinationSurveyResponseDto, VoiceSurveyResponseDto,
};

use crate::{
    error::MapperError,
    mappers::Mapper,
    models::{
        GeneralSurvey, OverconfidenceSurvey, TeamCoordinationSurvey, ThesisSurvey, VoiceSurvey,
    },
};

/// Whole survey to the submission payload. Submission only.
pub struct SurveyResponseMapper;

impl Mapper for SurveyResponseMapper {
    type Dto = SurveyResponseDto;
    type Model = ThesisSurvey;

    const NAME: &'static str = "SurveyResponseMapper";

    fn create_dto_from_model(
        &self,
        model: &ThesisSurvey,
    ) -> Result<SurveyResponseDto, MapperError> {
        let voice_mapper = VoiceSurveyMapper;
        Ok(SurveyResponseDto {
            general_survey_response: GeneralSurveyMapper
                .create_dto_from_model(&model.general_survey)?,
            overconfidence_survey_response: OverconfidenceMapper
                .create_dto_from_model(&model.overconfidence_survey)?,
            team_coordination_survey_response: TeamCoordinationMapper
                .create_dto_from_model(&model.team_coordination_survey)?,
            voice_survey_responses: model
                .voice_surveys
                .iter()
                .map(|survey| voice_mapper.create_dto_from_model(survey))
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

pub struct GeneralSurveyMapper;

impl Mapper for GeneralSurveyMapper {
    type Dto = GeneralSurveyResponseDto;
    type Model = GeneralSurvey;

    const NAME: &'static str = "GeneralSurveyMapper";

    fn create_dto_from_model(
        &self,
        model: &GeneralSurvey,
    ) -> Result<GeneralSurveyResponseDto, MapperError> {
        Ok(GeneralSurveyResponseDto {
            id: model.id,
            age: model.age,
            sex: model.sex.clone(),
        })
    }
}

pub struct OverconfidenceMapper;

impl Mapper for OverconfidenceMapper {
    type Dto = OverconfidenceSurveyResponseDto;
    type Model = OverconfidenceSurvey;

    const NAME: &'static str = "OverconfidenceMapper";

    fn create_dto_from_model(
        &self,
        model: &OverconfidenceSurvey,
    ) -> Result<OverconfidenceSurveyResponseDto, MapperError> {
        let [q01, q02, q03, q04, q05, q06, q07, q08, q09, q10] =
            (*model.responses()).map(|response| {
                response.map(|r| MinMaxResponseDto {
                    min: r.min(),
                    max: r.max(),
                })
            });

        Ok(OverconfidenceSurveyResponseDto {
            q01,
            q02,
            q03,
            q04,
            q05,
            q06,
            q07,
            q08,
            q09,
            q10,
        })
    }
}

pub struct TeamCoordinationMapper;

impl Mapper for TeamCoordinationMapper {
    type Dto = TeamCoordinationSurveyResponseDto;
    type Model = TeamCoordinationSurvey;

    const NAME: &'static str = "TeamCoordinationMapper";

    fn create_dto_from_model(
        &self,
        model: &TeamCoordinationSurvey,
    ) -> Result<TeamCoordinationSurveyResponseDto, MapperError> {
        let [q1, q2, q3, q4, q5] =
            (*model.responses()).map(|response| response.map(|r| r.value()));

        Ok(TeamCoordinationSurveyResponseDto { q1, q2, q3, q4, q5 })
    }
}

pub struct VoiceSurveyMapper;

impl Mapper for VoiceSurveyMapper {
    type Dto = VoiceSurveyResponseDto;
    type Model = VoiceSurvey;

    const NAME: &'static str = "VoiceSurveyMapper";

    fn create_dto_from_model(
        &self,
        model: &VoiceSurvey,
    ) -> Result<VoiceSurveyResponseDto, MapperError> {
        Ok(VoiceSurveyResponseDto {
            team_member: model.id().clone(),
            response: model.response.map(|r| r.value()),
        })
    }
}

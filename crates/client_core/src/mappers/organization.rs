use shared::dto::{MemberDto, OrganizationDto, OrganizationGeneralInfoDto, TeamDto, TeamInfoDto};

use crate::{
    error::MapperError,
    mappers::Mapper,
    models::{OrganizationGeneralInfo, OrganizationInfo, Team, TeamMember, TeamWithOrganizationInfo},
};

fn member_to_dto(member: &TeamMember) -> MemberDto {
    MemberDto {
        id: member.id.clone(),
        name: member.name.clone(),
        has_participated: member.has_participated,
    }
}

fn member_from_dto(dto: MemberDto) -> TeamMember {
    TeamMember {
        id: dto.id,
        name: dto.name,
        has_participated: dto.has_participated,
    }
}

fn team_to_dto(team: &Team) -> TeamDto {
    TeamDto {
        id: team.id.clone(),
        name: team.name.clone(),
        members: team.members.iter().map(member_to_dto).collect(),
        link: team.link.clone(),
    }
}

fn team_from_dto(dto: TeamDto) -> Team {
    Team {
        id: dto.id,
        name: dto.name,
        members: dto.members.into_iter().map(member_from_dto).collect(),
        link: dto.link,
    }
}

/// Registration form state to and from the organization creation payload.
pub struct OrganizationRegistrationMapper;

impl Mapper for OrganizationRegistrationMapper {
    type Dto = OrganizationDto;
    type Model = OrganizationInfo;

    const NAME: &'static str = "OrganizationRegistrationMapper";

    fn create_model_from_dto(&self, dto: OrganizationDto) -> Result<OrganizationInfo, MapperError> {
        Ok(OrganizationInfo {
            id: dto.id,
            general_info: OrganizationGeneralInfo {
                name: dto.name,
                email: dto.email,
                phone: dto.phone,
            },
            teams: dto.teams.into_iter().map(team_from_dto).collect(),
        })
    }

    fn create_dto_from_model(
        &self,
        model: &OrganizationInfo,
    ) -> Result<OrganizationDto, MapperError> {
        Ok(OrganizationDto {
            id: model.id.clone(),
            name: model.general_info.name.clone(),
            email: model.general_info.email.clone(),
            phone: model.general_info.phone.clone(),
            teams: model.teams.iter().map(team_to_dto).collect(),
        })
    }
}

pub struct TeamWithOrganizationInfoMapper;

impl Mapper for TeamWithOrganizationInfoMapper {
    type Dto = TeamInfoDto;
    type Model = TeamWithOrganizationInfo;

    const NAME: &'static str = "TeamWithOrganizationInfoMapper";

    fn create_model_from_dto(
        &self,
        dto: TeamInfoDto,
    ) -> Result<TeamWithOrganizationInfo, MapperError> {
        Ok(TeamWithOrganizationInfo {
            id: dto.id,
            name: dto.name,
            link: dto.link,
            members: dto.members.into_iter().map(member_from_dto).collect(),
            organization: OrganizationGeneralInfo {
                name: dto.organization.name,
                email: dto.organization.email,
                phone: dto.organization.phone,
            },
        })
    }

    fn create_dto_from_model(
        &self,
        model: &TeamWithOrganizationInfo,
    ) -> Result<TeamInfoDto, MapperError> {
        Ok(TeamInfoDto {
            id: model.id.clone(),
            name: model.name.clone(),
            link: model.link.clone(),
            members: model.members.iter().map(member_to_dto).collect(),
            organization: OrganizationGeneralInfoDto {
                name: model.organization.name.clone(),
                email: model.organization.email.clone(),
                phone: model.organization.phone.clone(),
            },
        })
    }
}

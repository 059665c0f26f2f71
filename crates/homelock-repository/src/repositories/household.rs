use super::settle;
use crate::error::RepositoryResult;
use crate::slot::ResponseSlot;
use homelock_network::{
    ApiResponse, BiometricRequest, BiometricToken, CreateMemberRequest, Endpoint, ImagePaths,
    LockApi, MemberId, MemberList,
};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

/// Household member management against the lock server.
///
/// Slots: member list, create member, biometric enrollment and image paths.
/// Starting a biometric enrollment publishes to the biometric slot only.
pub struct HouseholdMemberRepository<A> {
    api: Arc<A>,
    member_list: ResponseSlot<MemberList>,
    create_member: ResponseSlot<MemberId>,
    biometric: ResponseSlot<BiometricToken>,
    image_paths: ResponseSlot<ImagePaths>,
}

impl<A: LockApi> HouseholdMemberRepository<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            member_list: ResponseSlot::new(),
            create_member: ResponseSlot::new(),
            biometric: ResponseSlot::new(),
            image_paths: ResponseSlot::new(),
        }
    }

    /// Fetch every member of the household.
    pub async fn get_all_household_members(
        &self,
        session_id: &str,
    ) -> RepositoryResult<MemberList> {
        let outcome = self.api.get_user_list(session_id).await;
        let response = settle::<MemberList>(Endpoint::UserList, outcome)?;

        if let Some(members) = response.value() {
            debug!(count = members.len(), "Fetched household members");
        }

        self.member_list.publish(response.clone());
        Ok(response)
    }

    /// Create a member; success content is the new member's id.
    pub async fn create_member(
        &self,
        name: &str,
        role: &str,
        session_id: &str,
    ) -> RepositoryResult<MemberId> {
        let request = CreateMemberRequest::new(name, role, session_id);
        let outcome = self.api.create_user(&request).await;
        let response = settle::<MemberId>(Endpoint::CreateUser, outcome)?;

        if let Some(id) = response.value() {
            debug!(member_id = *id, role, "Household member created");
        }

        self.create_member.publish(response.clone());
        Ok(response)
    }

    /// Start fingerprint enrollment on the lock for `user_id`.
    pub async fn add_biometric_data(
        &self,
        user_id: i64,
        session_id: &str,
    ) -> RepositoryResult<BiometricToken> {
        let request = BiometricRequest::new(user_id, session_id);
        let outcome = self.api.start_biometric_data(&request).await;
        let response = settle::<BiometricToken>(Endpoint::StartBiometric, outcome)?;

        debug!(user_id, error = response.is_error(), "Biometric enrollment requested");

        self.biometric.publish(response.clone());
        Ok(response)
    }

    /// Paths of the images stored on the lock for `username`.
    pub async fn get_image_paths(
        &self,
        username: &str,
        session_id: &str,
    ) -> RepositoryResult<ImagePaths> {
        let outcome = self.api.get_image_paths(username, session_id).await;
        let response = settle::<ImagePaths>(Endpoint::ImagePaths, outcome)?;

        self.image_paths.publish(response.clone());
        Ok(response)
    }

    pub fn subscribe_member_list(&self) -> watch::Receiver<ApiResponse<MemberList>> {
        self.member_list.subscribe()
    }

    pub fn subscribe_create_member(&self) -> watch::Receiver<ApiResponse<MemberId>> {
        self.create_member.subscribe()
    }

    pub fn subscribe_biometric(&self) -> watch::Receiver<ApiResponse<BiometricToken>> {
        self.biometric.subscribe()
    }

    pub fn subscribe_image_paths(&self) -> watch::Receiver<ApiResponse<ImagePaths>> {
        self.image_paths.subscribe()
    }
}

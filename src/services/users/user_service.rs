//! # 사용자 관리 서비스 구현
//!
//! 사용자 계정의 전체 생명주기를 관리하는 핵심 비즈니스 로직을 구현합니다.
//!
//! ## 서비스 아키텍처
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         UserService                             │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────┐  │
//! │  │   Registration  │  │  Authentication │  │   User Query    │  │
//! │  │ • Input Valid   │  │ • Password Ver  │  │ • By ID/Email   │  │
//! │  │ • Duplicate Chk │  │ • Lockout       │  │ • Pagination    │  │
//! │  │ • Password Hash │  │ • Unlock/Reset  │  │ • Filter Search │  │
//! │  │ • Verify Email  │  │ • Email Verify  │  │ • Count         │  │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//!                 │                                 │
//!                 ▼                                 ▼
//!     ┌───────────────────────┐         ┌───────────────────────┐
//!     │  dyn UserRepository   │         │   dyn EmailService    │
//!     │ (MongoDB / InMemory)  │         │   (HTTP API / Log)    │
//!     └───────────────────────┘         └───────────────────────┘
//! ```
//!
//! ## 계정 잠금 상태 전이
//!
//! ```text
//! UNLOCKED(count=n) ──로그인 실패──▶ UNLOCKED(count=n+1)   (n+1 < max)
//! UNLOCKED(count=n) ──로그인 실패──▶ LOCKED(count=n+1)     (n+1 ≥ max)
//! UNLOCKED          ──로그인 성공──▶ UNLOCKED(count=0)
//! LOCKED            ──로그인 시도──▶ LOCKED (AccountLocked, 카운트 불변)
//! LOCKED            ──unlock──────▶ UNLOCKED(count=0)
//! ```
//!
//! ## 에러 규칙
//!
//! 예상 가능한 실패(검증, 미존재, 중복, 인증)는 각각의 `AppError` 변형으로,
//! 저장소/외부 시스템 장애는 `DatabaseError` 등으로 구분하여 반환합니다.
//! 조회 계열(`get_by_*`)에서 대상이 없는 것은 에러가 아닌 `Ok(None)`입니다.
//!
//! ## 쓰기 규칙
//!
//! 읽어 온 사용자 전체를 다시 저장하지 않고, 저장소의 필드 단위 연산만 사용합니다.
//! 조회와 저장 사이에 다른 요청이 계정을 잠가도 그 잠금은 유지됩니다.
//!
//! 서비스 밖으로 나가는 사용자 정보는 [`UserResponse`]로 투영해 전달합니다
//! ([`UserService::get_profile`], [`UserService::search_profiles`]).

use std::sync::Arc;
use std::time::Instant;

use bcrypt::{hash, verify};
use validator::Validate;

use crate::config::Settings;
use crate::core::errors::{AppError, AppResult, ErrorContext};
use crate::domain::dto::users::request::{ResetPasswordRequest, UserCreate, UserFilter, UserUpdate};
use crate::domain::dto::users::response::UserResponse;
use crate::domain::entities::users::user::{User, UserChanges, UserRole};
use crate::repositories::users::UserRepository;
use crate::services::email::EmailService;
use crate::utils::nickname_gen::generate_nickname;
use crate::utils::string_utils::clean_optional_string;
use crate::utils::token_utils::generate_verification_token;

/// 자동 닉네임 생성 시 충돌을 피하기 위한 최대 재시도 횟수
const NICKNAME_GENERATION_ATTEMPTS: usize = 20;

/// 사용자 관리 비즈니스 로직 서비스
///
/// 상태를 갖지 않으며, 의존성은 생성 시점에 명시적으로 주입됩니다.
/// `Arc`로 감싸 여러 태스크에서 동시에 공유할 수 있습니다.
///
/// # 사용 예제
///
/// ```rust,ignore
/// let service = UserService::new(user_repo, email_service, Settings::load());
///
/// let user = service.register_user(UserCreate::new("alice@example.com", "Secret123")).await?;
/// service.verify_email_with_token(&user.id, user.verification_token.as_deref().unwrap_or_default()).await?;
/// let logged_in = service.login_user("alice@example.com", "Secret123").await?;
/// ```
pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
    email_service: Arc<dyn EmailService>,
    settings: Settings,
}

impl UserService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        email_service: Arc<dyn EmailService>,
        settings: Settings,
    ) -> Self {
        Self {
            user_repo,
            email_service,
            settings,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// 새 사용자 계정 생성
    ///
    /// # 처리 과정
    ///
    /// 1. 입력 검증 (닉네임/이메일/비밀번호 형식)
    /// 2. 이메일/닉네임 중복 확인, 닉네임이 없으면 자동 생성
    /// 3. 권한 결정: 요청 권한 → 첫 번째 계정은 `ADMIN` → 그 외 `ANONYMOUS`
    /// 4. bcrypt 해싱 후 저장
    /// 5. `ADMIN`은 즉시 인증 처리, 그 외에는 인증 메일 발송
    ///
    /// # 에러
    ///
    /// * `ValidationError` - 입력 형식 오류 (아무것도 저장되지 않음)
    /// * `ConflictError` - 이메일 또는 닉네임 중복
    ///
    /// 인증 메일 발송 실패는 경고 로그만 남기고 계정 생성은 성공으로 처리합니다.
    pub async fn create(&self, request: UserCreate) -> AppResult<User> {
        let start_time = Instant::now();

        request.validate()?;

        if self.user_repo.find_by_email(&request.email).await?.is_some() {
            return Err(AppError::ConflictError(format!(
                "이미 사용 중인 이메일입니다: {}",
                request.email
            )));
        }

        let nickname = match request.nickname {
            Some(nickname) => {
                if self.user_repo.find_by_nickname(&nickname).await?.is_some() {
                    return Err(AppError::ConflictError(format!(
                        "이미 사용 중인 닉네임입니다: {}",
                        nickname
                    )));
                }
                nickname
            }
            None => self.generate_unique_nickname().await?,
        };

        let role = match request.role {
            Some(role) => role,
            None => {
                if self.user_repo.count().await? == 0 {
                    UserRole::Admin
                } else {
                    UserRole::Anonymous
                }
            }
        };

        let hash_start = Instant::now();
        let hashed_password = hash(&request.password, self.settings.bcrypt_cost)
            .context("비밀번호 해싱 실패")?;
        log::debug!("Password hashing took: {:?}", hash_start.elapsed());

        let mut user = User::new(nickname, request.email, hashed_password, role);
        user.first_name = clean_optional_string(request.first_name);
        user.last_name = clean_optional_string(request.last_name);
        user.bio = clean_optional_string(request.bio);
        user.profile_picture_url = clean_optional_string(request.profile_picture_url);
        user.linkedin_profile_url = clean_optional_string(request.linkedin_profile_url);
        user.github_profile_url = clean_optional_string(request.github_profile_url);

        if role == UserRole::Admin {
            user.is_verified = true;
        } else {
            user.verification_token = Some(generate_verification_token());
        }

        let created = self.user_repo.create(user).await?;

        if created.verification_token.is_some() {
            if let Err(e) = self.email_service.send_verification_email(&created).await {
                log::warn!("인증 메일 발송 실패 ({}): {}", created.email, e);
            }
        }

        log::info!(
            "사용자 생성: {} ({}, {}) - {:?}",
            created.id,
            created.nickname,
            created.role,
            start_time.elapsed()
        );

        Ok(created)
    }

    /// 공개 회원가입
    ///
    /// `create`와 동일하지만 요청에 포함된 권한은 무시합니다.
    pub async fn register_user(&self, mut request: UserCreate) -> AppResult<User> {
        if request.role.take().is_some() {
            log::debug!("회원가입 요청의 권한 필드 무시: {}", request.email);
        }
        self.create(request).await
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Option<User>> {
        self.user_repo.find_by_id(id).await
    }

    pub async fn get_by_nickname(&self, nickname: &str) -> AppResult<Option<User>> {
        self.user_repo.find_by_nickname(nickname).await
    }

    pub async fn get_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.user_repo.find_by_email(email).await
    }

    /// 외부 노출용 프로필 조회. 비밀번호 해시와 인증 토큰은 포함되지 않습니다.
    pub async fn get_profile(&self, id: &str) -> AppResult<Option<UserResponse>> {
        Ok(self.user_repo.find_by_id(id).await?.map(UserResponse::from))
    }

    /// [`search_users`](Self::search_users)와 같은 조건/순서의 외부 노출용 검색
    pub async fn search_profiles(&self, filter: &UserFilter) -> AppResult<Vec<UserResponse>> {
        let users = self.search_users(filter).await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    /// 사용자 정보 부분 수정
    ///
    /// 지정된 필드만 변경하며, 비밀번호는 다시 해싱됩니다.
    /// 검증/중복 오류 시 아무것도 저장되지 않습니다.
    pub async fn update(&self, id: &str, changes: UserUpdate) -> AppResult<User> {
        changes.validate()?;

        let user = self.require_user(id).await?;
        let mut patch = UserChanges::default();

        if let Some(email) = changes.email.filter(|email| *email != user.email) {
            if self.user_repo.find_by_email(&email).await?.is_some() {
                return Err(AppError::ConflictError(format!(
                    "이미 사용 중인 이메일입니다: {}",
                    email
                )));
            }
            patch.email = Some(email);
        }

        if let Some(nickname) = changes.nickname.filter(|nickname| *nickname != user.nickname) {
            if self.user_repo.find_by_nickname(&nickname).await?.is_some() {
                return Err(AppError::ConflictError(format!(
                    "이미 사용 중인 닉네임입니다: {}",
                    nickname
                )));
            }
            patch.nickname = Some(nickname);
        }

        if let Some(password) = changes.password {
            patch.hashed_password = Some(hash(&password, self.settings.bcrypt_cost)
                .context("비밀번호 해싱 실패")?);
        }

        let cleaned = |value: Option<String>| value.map(|raw| clean_optional_string(Some(raw)));
        patch.first_name = cleaned(changes.first_name);
        patch.last_name = cleaned(changes.last_name);
        patch.bio = cleaned(changes.bio);
        patch.profile_picture_url = cleaned(changes.profile_picture_url);
        patch.linkedin_profile_url = cleaned(changes.linkedin_profile_url);
        patch.github_profile_url = cleaned(changes.github_profile_url);
        patch.role = changes.role;

        self.user_repo
            .update(id, &patch)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("사용자를 찾을 수 없습니다: {}", id)))
    }

    /// 전문가 인증 상태 변경
    pub async fn update_professional_status(&self, id: &str, is_professional: bool) -> AppResult<User> {
        let patch = UserChanges {
            is_professional: Some(is_professional),
            ..Default::default()
        };

        let updated = self
            .user_repo
            .update(id, &patch)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("사용자를 찾을 수 없습니다: {}", id)))?;

        log::info!("전문가 상태 변경: {} → {}", id, is_professional);
        Ok(updated)
    }

    /// 사용자 삭제. 대상이 없으면 `Ok(false)`.
    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        let deleted = self.user_repo.delete(id).await?;

        if deleted {
            log::info!("사용자 삭제: {}", id);
        }

        Ok(deleted)
    }

    /// (`created_at`, `id`) 오름차순 페이지 조회
    pub async fn list_users(&self, skip: u64, limit: u64) -> AppResult<Vec<User>> {
        self.user_repo.list(skip, limit).await
    }

    pub async fn count(&self) -> AppResult<u64> {
        self.user_repo.count().await
    }

    /// 필터 조건(AND)에 맞는 사용자 검색. 결과가 없으면 빈 목록.
    pub async fn search_users(&self, filter: &UserFilter) -> AppResult<Vec<User>> {
        let users = self.user_repo.search(filter).await?;
        log::debug!("사용자 검색 결과 {}건: {:?}", users.len(), filter);
        Ok(users)
    }

    /// 이메일/비밀번호 로그인
    ///
    /// # 처리 순서
    ///
    /// 1. 이메일로 사용자 조회 (없으면 `AuthenticationError`)
    /// 2. 잠긴 계정이면 비밀번호 확인 없이 `AccountLocked`
    /// 3. 이메일 미인증이면 `EmailNotVerified`
    /// 4. 비밀번호 불일치 시 실패 횟수를 원자적으로 증가시키고 `AuthenticationError`
    /// 5. 성공 시 실패 횟수 초기화, 마지막 로그인 시간 기록
    ///
    /// 존재하지 않는 이메일과 틀린 비밀번호는 같은 메시지를 반환합니다.
    pub async fn login_user(&self, email: &str, password: &str) -> AppResult<User> {
        let start_time = Instant::now();

        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::AuthenticationError("잘못된 이메일 또는 비밀번호입니다".to_string()))?;

        if user.is_locked {
            log::warn!("잠긴 계정 로그인 시도: {}", user.id);
            return Err(AppError::AccountLocked(
                "로그인 실패 횟수 초과로 잠긴 계정입니다".to_string(),
            ));
        }

        if !user.is_verified {
            return Err(AppError::EmailNotVerified(
                "이메일 인증 후 로그인할 수 있습니다".to_string(),
            ));
        }

        let verify_start = Instant::now();
        let is_valid = verify(password, &user.hashed_password).context("비밀번호 검증 실패")?;
        log::debug!("Password verification took: {:?}", verify_start.elapsed());

        if !is_valid {
            let updated = self
                .user_repo
                .increment_failed_login(&user.id, self.settings.max_login_attempts)
                .await?;

            if let Some(updated) = updated {
                if updated.is_locked {
                    log::warn!(
                        "🔒 로그인 {}회 실패로 계정 잠금: {}",
                        updated.failed_login_count,
                        updated.id
                    );
                } else {
                    log::info!(
                        "로그인 실패 ({}/{}): {}",
                        updated.failed_login_count,
                        self.settings.max_login_attempts,
                        updated.id
                    );
                }
            }

            return Err(AppError::AuthenticationError("잘못된 이메일 또는 비밀번호입니다".to_string()));
        }

        // 비밀번호 확인 중 다른 요청이 계정을 잠갔다면 성공 처리하지 않음
        let Some(logged_in) = self.user_repo.record_login_success(&user.id).await? else {
            let still_exists = self.user_repo.find_by_id(&user.id).await?;
            return Err(match still_exists {
                Some(current) if current.is_locked => {
                    log::warn!("로그인 처리 중 계정 잠금됨: {}", user.id);
                    AppError::AccountLocked("로그인 실패 횟수 초과로 잠긴 계정입니다".to_string())
                }
                _ => AppError::AuthenticationError("잘못된 이메일 또는 비밀번호입니다".to_string()),
            });
        };

        log::debug!("Total login took: {:?}", start_time.elapsed());
        Ok(logged_in)
    }

    /// 계정 잠금 여부. 존재하지 않는 이메일은 `false`.
    pub async fn is_account_locked(&self, email: &str) -> AppResult<bool> {
        Ok(self
            .user_repo
            .find_by_email(email)
            .await?
            .is_some_and(|user| user.is_locked))
    }

    /// 잠긴 계정 해제
    ///
    /// * `Ok(true)` - 잠금 해제 및 실패 횟수 초기화
    /// * `Ok(false)` - 이미 잠기지 않은 계정
    /// * `Err(NotFound)` - 존재하지 않는 사용자
    pub async fn unlock_user_account(&self, id: &str) -> AppResult<bool> {
        self.require_user(id).await?;

        let unlocked = self.user_repo.unlock(id).await?.is_some();

        if unlocked {
            log::info!("🔓 계정 잠금 해제: {}", id);
        }

        Ok(unlocked)
    }

    /// 비밀번호 재설정
    ///
    /// 새 비밀번호를 검증 후 해싱하여 저장합니다. 잠금 상태는 변경하지 않습니다.
    /// 저장 직전에 사용자가 삭제된 경우 `Ok(false)`를 반환합니다.
    pub async fn reset_password(&self, id: &str, new_password: &str) -> AppResult<bool> {
        let request = ResetPasswordRequest {
            new_password: new_password.to_string(),
        };
        request.validate()?;

        self.require_user(id).await?;

        let hashed_password = hash(&request.new_password, self.settings.bcrypt_cost)
            .context("비밀번호 해싱 실패")?;
        let reset = self.user_repo.set_password(id, &hashed_password).await?.is_some();

        if reset {
            log::info!("비밀번호 재설정: {}", id);
        }

        Ok(reset)
    }

    /// 이메일 인증 토큰 확인
    ///
    /// 저장된 토큰과 정확히 일치하면 인증 완료 처리하고 `ANONYMOUS`를
    /// `AUTHENTICATED`로 승격합니다. 불일치하거나 토큰이 없으면 아무것도
    /// 변경하지 않고 `Ok(false)`를 반환합니다.
    pub async fn verify_email_with_token(&self, id: &str, token: &str) -> AppResult<bool> {
        self.require_user(id).await?;

        match self.user_repo.consume_verification_token(id, token).await? {
            Some(verified) => {
                log::info!("✅ 이메일 인증 완료: {} ({})", id, verified.role);
                Ok(true)
            }
            None => {
                log::debug!("이메일 인증 토큰 불일치: {}", id);
                Ok(false)
            }
        }
    }

    async fn require_user(&self, id: &str) -> AppResult<User> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("사용자를 찾을 수 없습니다: {}", id)))
    }

    async fn generate_unique_nickname(&self) -> AppResult<String> {
        for _ in 0..NICKNAME_GENERATION_ATTEMPTS {
            let candidate = generate_nickname();
            if self.user_repo.find_by_nickname(&candidate).await?.is_none() {
                return Ok(candidate);
            }
        }

        Err(AppError::InternalError("사용 가능한 닉네임을 생성하지 못했습니다".to_string()))
    }
}

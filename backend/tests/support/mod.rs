//! In-memory repository doubles backing the HTTP integration tests.
//!
//! The doubles implement the domain repository ports over mutexed maps so
//! the full handler → service → repository flow runs without a database.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use backend::domain::answer::Answer;
use backend::domain::ports::{
    AnswerPersistenceError, AnswerRepository, LoginService, QuestionListQuery, QuestionPage,
    QuestionPersistenceError, QuestionRepository, UserPersistenceError, UserRepository,
};
use backend::domain::question::Question;
use backend::domain::user::{User, Username};
use backend::domain::voting::Votable;
use backend::domain::{
    AcceptanceService, AnswerService, Error, ModerationService, QuestionService,
    UserProfileService, VoteService,
};
use backend::inbound::http::state::HttpState;

#[derive(Default)]
pub struct InMemoryQuestions {
    records: Mutex<HashMap<Uuid, Question>>,
}

#[async_trait]
impl QuestionRepository for InMemoryQuestions {
    async fn save(&self, question: &Question) -> Result<(), QuestionPersistenceError> {
        self.records
            .lock()
            .expect("questions lock")
            .insert(question.id(), question.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Question>, QuestionPersistenceError> {
        Ok(self.records.lock().expect("questions lock").get(&id).cloned())
    }

    async fn record_view(&self, id: Uuid) -> Result<(), QuestionPersistenceError> {
        if let Some(question) = self.records.lock().expect("questions lock").get_mut(&id) {
            question.record_view();
        }
        Ok(())
    }

    async fn list(
        &self,
        query: QuestionListQuery,
    ) -> Result<QuestionPage, QuestionPersistenceError> {
        let records = self.records.lock().expect("questions lock");
        let mut questions: Vec<Question> = records
            .values()
            .filter(|question| {
                query
                    .status
                    .is_none_or(|status| question.status() == status)
            })
            .cloned()
            .collect();
        // Newest-first is the only ordering the tests drive.
        questions.sort_by(|a, b| b.created_at().cmp(&a.created_at()));

        let total = questions.len() as u64;
        let start = usize::try_from(query.params.offset())
            .unwrap_or(usize::MAX)
            .min(questions.len());
        let len = usize::try_from(query.params.limit()).unwrap_or(usize::MAX);
        let end = start.saturating_add(len).min(questions.len());
        Ok(QuestionPage {
            questions: questions[start..end].to_vec(),
            total,
        })
    }
}

#[derive(Default)]
pub struct InMemoryAnswers {
    records: Mutex<HashMap<Uuid, Answer>>,
}

#[async_trait]
impl AnswerRepository for InMemoryAnswers {
    async fn save(&self, answer: &Answer) -> Result<(), AnswerPersistenceError> {
        self.records
            .lock()
            .expect("answers lock")
            .insert(answer.id(), answer.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Answer>, AnswerPersistenceError> {
        Ok(self.records.lock().expect("answers lock").get(&id).cloned())
    }

    async fn list_for_question(
        &self,
        question_id: Uuid,
    ) -> Result<Vec<Answer>, AnswerPersistenceError> {
        let records = self.records.lock().expect("answers lock");
        let mut answers: Vec<Answer> = records
            .values()
            .filter(|answer| answer.question_id() == question_id)
            .cloned()
            .collect();
        answers.sort_by(|a, b| {
            b.is_accepted()
                .cmp(&a.is_accepted())
                .then(b.vote_count().cmp(&a.vote_count()))
                .then(a.created_at().cmp(&b.created_at()))
        });
        Ok(answers)
    }

    async fn count_for_questions(
        &self,
        question_ids: Vec<Uuid>,
    ) -> Result<Vec<(Uuid, i64)>, AnswerPersistenceError> {
        let records = self.records.lock().expect("answers lock");
        let mut counts: HashMap<Uuid, i64> = HashMap::new();
        for answer in records.values() {
            if question_ids.contains(&answer.question_id()) {
                *counts.entry(answer.question_id()).or_default() += 1;
            }
        }
        Ok(counts.into_iter().collect())
    }
}

#[derive(Default)]
pub struct InMemoryUsers {
    records: Mutex<HashMap<Uuid, User>>,
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn upsert(&self, user: &User) -> Result<(), UserPersistenceError> {
        self.records
            .lock()
            .expect("users lock")
            .insert(user.id(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.records.lock().expect("users lock").get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .records
            .lock()
            .expect("users lock")
            .values()
            .find(|user| user.username().as_ref() == username)
            .cloned())
    }

    async fn find_by_ids(&self, ids: Vec<Uuid>) -> Result<Vec<User>, UserPersistenceError> {
        let records = self.records.lock().expect("users lock");
        Ok(ids
            .iter()
            .filter_map(|id| records.get(id).cloned())
            .collect())
    }
}

/// Login double with the same first-login provisioning as the Diesel adapter.
pub struct InMemoryLogin {
    users: Arc<InMemoryUsers>,
}

#[async_trait]
impl LoginService for InMemoryLogin {
    async fn login(&self, username: &Username) -> Result<User, Error> {
        let existing = self
            .users
            .find_by_username(username.as_ref())
            .await
            .map_err(|err| Error::internal(err.to_string()))?;
        if let Some(user) = existing {
            return Ok(user);
        }

        let user = User::register(username.clone(), Utc::now());
        self.users
            .upsert(&user)
            .await
            .map_err(|err| Error::internal(err.to_string()))?;
        Ok(user)
    }
}

/// HTTP state wired with real services over shared in-memory repositories.
pub fn in_memory_state() -> HttpState {
    let questions = Arc::new(InMemoryQuestions::default());
    let answers = Arc::new(InMemoryAnswers::default());
    let users = Arc::new(InMemoryUsers::default());

    let question_service = Arc::new(QuestionService::new(
        questions.clone(),
        answers.clone(),
        users.clone(),
    ));

    HttpState {
        login: Arc::new(InMemoryLogin {
            users: users.clone(),
        }),
        questions: question_service.clone(),
        questions_query: question_service,
        answers: Arc::new(AnswerService::new(
            questions.clone(),
            answers.clone(),
            users.clone(),
        )),
        votes: Arc::new(VoteService::new(
            questions.clone(),
            answers.clone(),
            users.clone(),
        )),
        acceptance: Arc::new(AcceptanceService::new(questions, answers, users.clone())),
        profiles: Arc::new(UserProfileService::new(users.clone())),
        moderation: Arc::new(ModerationService::new(users)),
    }
}

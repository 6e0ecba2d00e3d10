//! GraphQL documents for the supported operations.
//!
//! Each constant is the full document posted by the corresponding
//! [`CooperPair`](crate::CooperPair) method. They double as worked
//! examples for callers who outgrow the wrapper and pass their own
//! documents to [`CooperPair::query`](crate::CooperPair::query).

/// Exchange account credentials for a session token.
pub const LOGIN: &str = r#"
mutation loginMutation($input: LoginInput!) {
    login(input: $input) {
        token
    }
}
"#;

/// Create an evaluation of a checkpoint against a dataset.
pub const ADD_EVALUATION: &str = r#"
mutation addEvaluationMutation($evaluation: AddEvaluationInput!) {
    addEvaluation(input: $evaluation) {
        evaluation {
            id
            dataset {
                id
            }
            checkpoint {
                id
            }
            createdBy {
                id
            }
            organization {
                id
            }
            results {
                pageInfo {
                    hasNextPage
                    hasPreviousPage
                    startCursor
                    endCursor
                }
                edges {
                    cursor
                    node {
                        id
                    }
                }
            }
            status
        }
    }
}
"#;

/// Fetch an evaluation with its status.
pub const EVALUATION: &str = r#"
query evaluationQuery($id: ID!) {
    evaluation(id: $id) {
        id
        dataset {
            id
        }
        checkpoint {
            id
        }
        status
        updatedAt
    }
}
"#;

/// Update an evaluation's status or results.
pub const UPDATE_EVALUATION: &str = r#"
mutation($updateEvaluation: UpdateEvaluationInput!) {
    updateEvaluation(input: $updateEvaluation) {
        evaluation {
            id
            datasetId
            checkpointId
            createdById
            createdBy {
                id
            }
            dataset {
                id
                filename
            }
            organizationId
            organization {
                id
            }
            checkpoint {
                id
                name
            }
            results {
                edges {
                    cursor
                    node {
                        id
                        success
                        summaryObj
                        expectationType
                        expectationKwargs
                        raisedException
                        exceptionTraceback
                        evaluationId
                    }
                }
            }
            status
            updatedAt
        }
    }
}
"#;

/// Fetch a dataset record.
pub const DATASET: &str = r#"
query datasetQuery($id: ID!) {
    dataset(id: $id) {
        id
        project {
            id
        }
        createdBy {
            id
        }
        filename
        s3Key
        organization {
            id
        }
    }
}
"#;

/// Create a dataset record; the response carries a presigned upload URL.
pub const ADD_DATASET: &str = r#"
mutation addDatasetMutation($dataset: AddDatasetInput!) {
    addDataset(input: $dataset) {
        dataset {
            id
            project {
                id
            }
            createdBy {
                id
            }
            filename
            s3Url
            s3Key
            organization {
                id
            }
        }
    }
}
"#;

/// List all datasets.
pub const ALL_DATASETS: &str = r#"
query allDatasetsQuery {
    allDatasets {
        edges {
            node {
                id
                s3Key
                filename
            }
        }
    }
}
"#;

/// Create a checkpoint, optionally autoinspecting a dataset.
pub const ADD_CHECKPOINT: &str = r#"
mutation addCheckpointMutation($checkpoint: AddCheckpointInput!) {
    addCheckpoint(input: $checkpoint) {
        checkpoint {
            id
            name
            slug
            autoinspectionStatus
            createdBy {
                id
            }
            expectations {
                pageInfo {
                    hasNextPage
                    hasPreviousPage
                    startCursor
                    endCursor
                }
                edges {
                    cursor
                    node {
                        id
                    }
                }
            }
            organization {
                id
            }
        }
    }
}
"#;

/// Fetch a checkpoint with its expectations and sections.
pub const CHECKPOINT: &str = r#"
query checkpointQuery($id: ID!) {
    checkpoint(id: $id) {
        id
        name
        slug
        isActivated
        autoinspectionStatus
        createdBy {
            id
            firstName
            lastName
            email
        }
        expectations {
            pageInfo {
                hasNextPage
                hasPreviousPage
                startCursor
                endCursor
            }
            edges {
                cursor
                node {
                    id
                    expectationType
                    expectationKwargs
                    isActivated
                    createdBy {
                        id
                    }
                    organization {
                        id
                    }
                }
            }
        }
        sections {
            edges {
                node {
                    id
                    name
                    slug
                    sequenceNumber
                    questions {
                        edges {
                            node {
                                id
                                questionObj
                                sequenceNumber
                                expectation {
                                    id
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
"#;

/// Update a checkpoint's autoinspection status, expectations, or sections.
pub const UPDATE_CHECKPOINT: &str = r#"
mutation($updateCheckpoint: UpdateCheckpointInput!) {
    updateCheckpoint(input: $updateCheckpoint) {
        checkpoint {
            id
            autoinspectionStatus
            expectations {
                pageInfo {
                    hasNextPage
                    hasPreviousPage
                    startCursor
                    endCursor
                }
                edges {
                    cursor
                    node {
                        id
                        expectationType
                        expectationKwargs
                        isActivated
                        createdBy {
                            id
                        }
                        organization {
                            id
                        }
                    }
                }
            }
            sections {
                edges {
                    node {
                        id
                        name
                        slug
                        sequenceNumber
                        questions {
                            edges {
                                node {
                                    id
                                    questionObj
                                    sequenceNumber
                                    expectation {
                                        id
                                        expectationType
                                        expectationKwargs
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
"#;

/// List all checkpoints by id and name.
pub const ALL_CHECKPOINTS: &str = r#"
query listCheckpointsQuery {
    allCheckpoints {
        edges {
            node {
                id
                name
            }
        }
    }
}
"#;

/// List all checkpoints with their full expectation connections.
pub const ALL_CHECKPOINTS_WITH_EXPECTATIONS: &str = r#"
query listCheckpointsQuery {
    allCheckpoints {
        pageInfo {
            hasNextPage
            hasPreviousPage
            startCursor
            endCursor
        }
        edges {
            cursor
            node {
                id
                name
                autoinspectionStatus
                organization {
                    id
                }
                expectations {
                    pageInfo {
                        hasNextPage
                        hasPreviousPage
                        startCursor
                        endCursor
                    }
                    edges {
                        cursor
                        node {
                            id
                            expectationType
                            expectationKwargs
                            isActivated
                            createdBy {
                                id
                            }
                            organization {
                                id
                            }
                        }
                    }
                }
            }
        }
    }
}
"#;

/// Fetch an expectation.
pub const EXPECTATION: &str = r#"
query expectationQuery($id: ID!) {
    expectation(id: $id) {
        id
        expectationType
        expectationKwargs
        isActivated
        createdBy {
            id
        }
        organization {
            id
        }
        checkpoint {
            id
        }
    }
}
"#;

/// Add an expectation to a checkpoint.
pub const ADD_EXPECTATION: &str = r#"
mutation addExpectationMutation($expectation: AddExpectationInput!) {
    addExpectation(input: $expectation) {
        expectation {
            id
            expectationType
            expectationKwargs
            isActivated
            createdBy {
                id
            }
            organization {
                id
            }
            checkpoint {
                id
            }
        }
    }
}
"#;

/// Update an existing expectation.
pub const UPDATE_EXPECTATION: &str = r#"
mutation updateExpectationMutation($expectation: UpdateExpectationInput!) {
    updateExpectation(input: $expectation) {
        expectation {
            id
            expectationType
            expectationKwargs
            isActivated
            createdBy {
                id
            }
            organization {
                id
            }
            checkpoint {
                id
            }
        }
    }
}
"#;

/// List all configured notifications.
pub const ALL_CONFIGURED_NOTIFICATIONS: &str = r#"
query allConfiguredNotificationsQuery {
    allConfiguredNotifications {
        edges {
            cursor
            node {
                id
                notificationType
                notifyOn
                value
            }
        }
    }
}
"#;

table! {
    profile (id) {
        id -> Integer,
        name -> Text,
        title -> Text,
        bio -> Text,
        location -> Text,
        phone -> Text,
        email -> Text,
        profile_image -> Nullable<Text>,
        hero_image -> Nullable<Text>,
        cv_file -> Nullable<Text>,
        github_url -> Nullable<Text>,
        linkedin_url -> Nullable<Text>,
        instagram_url -> Nullable<Text>,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

table! {
    skill (id) {
        id -> Integer,
        name -> Text,
        percentage -> Integer,
        sort_order -> Integer,
    }
}

table! {
    education (id) {
        id -> Integer,
        degree -> Text,
        institution -> Text,
        description -> Text,
        start_year -> Integer,
        end_year -> Nullable<Integer>,
        is_current -> Bool,
        degree_level -> Text,
        sort_order -> Integer,
    }
}

table! {
    certification (id) {
        id -> Integer,
        title -> Text,
        issuer -> Text,
        description -> Text,
        is_current -> Bool,
        sort_order -> Integer,
    }
}

table! {
    interest (id) {
        id -> Integer,
        title -> Text,
        description -> Text,
        icon -> Text,
        sort_order -> Integer,
    }
}

table! {
    project (id) {
        id -> Integer,
        title -> Text,
        slug -> Text,
        category -> Text,
        short_description -> Text,
        description -> Text,
        detailed_content -> Text,
        tech_stack -> Text,
        project_date -> Text,
        live_url -> Nullable<Text>,
        github_url -> Nullable<Text>,
        thumbnail -> Nullable<Text>,
        featured -> Bool,
        sort_order -> Integer,
        created_at -> Timestamp,
    }
}

table! {
    project_tag (id) {
        id -> Integer,
        project_id -> Integer,
        name -> Text,
    }
}

table! {
    project_image (id) {
        id -> Integer,
        project_id -> Integer,
        image -> Text,
        sort_order -> Integer,
    }
}

table! {
    career_goal (id) {
        id -> Integer,
        timeframe -> Text,
        title -> Text,
        goals -> Text,
        sort_order -> Integer,
    }
}

table! {
    contact_message (id) {
        id -> Integer,
        name -> Text,
        email -> Text,
        subject -> Text,
        message -> Text,
        created_at -> Timestamp,
        read -> Bool,
    }
}

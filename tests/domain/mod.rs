mod job_id_test;
